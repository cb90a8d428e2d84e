use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("buffer too short")]
    TooShort,
    #[error("unknown event kind: {0}")]
    UnknownKind(u8),
    #[error("event length mismatch")]
    LengthMismatch,
    #[error("participant index out of range: {0}")]
    BadParticipant(u8),
}
