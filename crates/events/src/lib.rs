//! Domain events describing stock movements.
//!
//! Events are facts: once emitted they are never mutated. They are wrapped in
//! an [`EventEnvelope`] carrying an id and a stream position so consumers can
//! replay them in order.

pub mod envelope;
pub mod event;

pub use envelope::EventEnvelope;
pub use event::Event;
