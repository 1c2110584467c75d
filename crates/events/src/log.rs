use crate::{Event, EventEnvelope};

/// In-memory append-only event log.
///
/// There is deliberately no way to edit or remove a recorded event: the only
/// write operation is [`EventLog::append`].
#[derive(Debug, Clone)]
pub struct EventLog<E> {
    entries: Vec<EventEnvelope<E>>,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<E: Event> EventLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and return its envelope.
    pub fn append(&mut self, event: E) -> &EventEnvelope<E> {
        let sequence_number = self.last_sequence() + 1;
        let envelope = EventEnvelope::new(sequence_number, event.event_type(), event.version(), event);
        self.entries.push(envelope);
        &self.entries[self.entries.len() - 1]
    }

    /// Sequence number of the latest entry (0 when empty).
    pub fn last_sequence(&self) -> u64 {
        self.entries.last().map(|e| e.sequence_number()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Envelopes in append order.
    pub fn iter(&self) -> impl Iterator<Item = &EventEnvelope<E>> {
        self.entries.iter()
    }

    /// Payloads in append order.
    pub fn events(&self) -> impl Iterator<Item = &E> {
        self.entries.iter().map(|e| e.payload())
    }

    /// Envelopes appended after `sequence_number` (cursor-style reads).
    pub fn after(&self, sequence_number: u64) -> impl Iterator<Item = &EventEnvelope<E>> {
        self.entries
            .iter()
            .filter(move |e| e.sequence_number() > sequence_number)
    }
}
