//! Wire layout constants.

/// Number of participants in a session. The protocol is strictly
/// two-party; participant indexes are 0 and 1.
pub const PARTICIPANTS: u8 = 2;

/// Fixed event header length in bytes: kind tag, sequence index, tick.
pub const EVENT_HEADER_LEN: usize = 9;

/// Payload length of a button-state event: participant index plus the
/// button bitmask.
pub const BUTTON_STATE_PAYLOAD_LEN: usize = 2;

/// Size of the largest event any current kind can produce. Useful for
/// sizing receive buffers.
pub const MAX_EVENT_LEN: usize = EVENT_HEADER_LEN + BUTTON_STATE_PAYLOAD_LEN;
