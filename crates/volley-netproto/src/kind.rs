use strum::FromRepr;

/// Event kind tag, the first byte of every datagram.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
pub enum EventKind {
    /// A participant's full button bitmask changed.
    ButtonState = 0,
}
