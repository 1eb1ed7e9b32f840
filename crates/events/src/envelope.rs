use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Event;

/// Envelope for an event, carrying identity and stream position.
///
/// - `event_id` is unique per emitted event (UUIDv7, time-ordered).
/// - `sequence_number` increases by exactly one per event within the stream
///   that produced it, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    /// Monotonically increasing position in the emitting stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(event_id: Uuid, sequence_number: u64, payload: E) -> Self {
        Self {
            event_id,
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

impl<E: Event> EventEnvelope<E> {
    /// Wrap `payload` with a freshly generated event id.
    pub fn wrap(sequence_number: u64, payload: E) -> Self {
        Self::new(Uuid::now_v7(), sequence_number, payload)
    }

    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Pinged {
        at: DateTime<Utc>,
    }

    impl Event for Pinged {
        fn event_type(&self) -> &'static str {
            "test.pinged"
        }

        fn version(&self) -> u32 {
            1
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    #[test]
    fn wrap_assigns_distinct_ids() {
        let payload = Pinged { at: Utc::now() };
        let a = EventEnvelope::wrap(1, payload.clone());
        let b = EventEnvelope::wrap(2, payload);

        assert_ne!(a.event_id(), b.event_id());
        assert_eq!(a.sequence_number(), 1);
        assert_eq!(b.sequence_number(), 2);
        assert_eq!(a.event_type(), "test.pinged");
    }

    #[test]
    fn envelope_survives_json() {
        let env = EventEnvelope::wrap(7, Pinged { at: Utc::now() });
        let json = serde_json::to_string(&env).unwrap();
        let back: EventEnvelope<Pinged> = serde_json::from_str(&json).unwrap();
        assert_eq!(env, back);
    }
}
