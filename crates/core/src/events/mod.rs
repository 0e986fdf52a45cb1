//! Domain events and sinks.

mod domain_event;
mod sink;

pub use domain_event::DomainEvent;
pub use sink::{DomainEventSink, MockEventSink, NoOpEventSink};
