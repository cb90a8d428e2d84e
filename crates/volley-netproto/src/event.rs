use crate::{
    constants::{BUTTON_STATE_PAYLOAD_LEN, EVENT_HEADER_LEN, PARTICIPANTS},
    error::WireError,
    kind::EventKind,
};

/// One discrete simulation step at the fixed simulation rate.
pub type Tick = u32;

/// Per-sender send counter. Assigned in send order and never reused, it
/// breaks ties between events that target the same tick.
pub type SeqIndex = u32;

/// An input event as it travels between peers (wire format).
///
/// Encoding rules:
/// - Fixed size per kind: `EVENT_HEADER_LEN` bytes of header followed by a
///   kind-specific payload.
/// - Integer fields are big-endian, fixed width, no padding.
/// - Layout is defined by `encode()` / `decode()` offsets below.
///
/// Decode rules:
/// - Requires a known kind tag in byte 0.
/// - Requires the buffer length to match the kind's exact event length.
/// - Requires the participant index to be in range for a two-party
///   session.
///
/// Events are totally ordered by [`InputEvent::sort_key`]: ascending
/// `(tick, seq)`. Sequence indexes are per-sender, so two peers' events at
/// the same tick resolve the same way on both sides regardless of arrival
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Sender's send-order counter.
    pub seq: SeqIndex,
    /// Simulation tick this event takes effect at.
    pub tick: Tick,
    /// Kind-specific payload.
    pub body: EventBody,
}

/// Kind-specific event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventBody {
    /// A participant's held-button bitmask changed to `buttons`.
    ButtonState { participant: u8, buttons: u8 },
}

impl InputEvent {
    /// Convenience constructor for the button-state kind.
    pub fn button_state(seq: SeqIndex, tick: Tick, participant: u8, buttons: u8) -> Self {
        Self {
            seq,
            tick,
            body: EventBody::ButtonState {
                participant,
                buttons,
            },
        }
    }

    /// The wire tag for this event's body.
    pub fn kind(&self) -> EventKind {
        match self.body {
            EventBody::ButtonState { .. } => EventKind::ButtonState,
        }
    }

    /// The participant this event belongs to.
    pub fn participant(&self) -> u8 {
        match self.body {
            EventBody::ButtonState { participant, .. } => participant,
        }
    }

    /// Total ordering key: ascending `(tick, seq)`.
    pub fn sort_key(&self) -> (Tick, SeqIndex) {
        (self.tick, self.seq)
    }

    /// Encode into a fresh datagram.
    ///
    /// Offsets (bytes):
    /// - 0     kind tag
    /// - 1..5  seq (u32 BE)
    /// - 5..9  tick (u32 BE)
    ///
    /// Button-state payload:
    /// - 9     participant index
    /// - 10    button bitmask
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(EVENT_HEADER_LEN + BUTTON_STATE_PAYLOAD_LEN);
        out.push(self.kind() as u8);
        out.extend_from_slice(&self.seq.to_be_bytes());
        out.extend_from_slice(&self.tick.to_be_bytes());

        match self.body {
            EventBody::ButtonState {
                participant,
                buttons,
            } => {
                out.push(participant);
                out.push(buttons);
            }
        }
        out
    }

    /// Decode a datagram that contains exactly one event.
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() < EVENT_HEADER_LEN {
            return Err(WireError::TooShort);
        }

        let kind = EventKind::from_repr(buf[0]).ok_or(WireError::UnknownKind(buf[0]))?;
        let seq = read_u32_be(buf, 1)?;
        let tick = read_u32_be(buf, 5)?;

        match kind {
            EventKind::ButtonState => {
                let expected = EVENT_HEADER_LEN + BUTTON_STATE_PAYLOAD_LEN;
                if buf.len() < expected {
                    return Err(WireError::TooShort);
                }
                if buf.len() != expected {
                    return Err(WireError::LengthMismatch);
                }

                let participant = buf[EVENT_HEADER_LEN];
                if participant >= PARTICIPANTS {
                    return Err(WireError::BadParticipant(participant));
                }
                let buttons = buf[EVENT_HEADER_LEN + 1];

                Ok(Self::button_state(seq, tick, participant, buttons))
            }
        }
    }
}

fn read_u32_be(buf: &[u8], start: usize) -> Result<u32, WireError> {
    let bytes: [u8; 4] = buf
        .get(start..start + 4)
        .ok_or(WireError::TooShort)?
        .try_into()
        .map_err(|_| WireError::TooShort)?;
    Ok(u32::from_be_bytes(bytes))
}
