use serde::{Deserialize, Serialize};

/// Envelope for an event recorded in an [`EventLog`](crate::EventLog).
///
/// `sequence_number` is the 1-based append position within the log. It
/// reflects insertion order only; business time lives in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    sequence_number: u64,
    event_type: String,
    event_version: u32,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        sequence_number: u64,
        event_type: impl Into<String>,
        event_version: u32,
        payload: E,
    ) -> Self {
        Self {
            sequence_number,
            event_type: event_type.into(),
            event_version,
            payload,
        }
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn event_version(&self) -> u32 {
        self.event_version
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
