//! Domain event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::DomainEvent;

/// Receiver for domain events.
///
/// `emit()` must be fast and non-blocking; implementations queue events for
/// asynchronous delivery. A failed emit must never fail the operation that
/// produced the event.
pub trait DomainEventSink: Send + Sync {
    /// Emit a single domain event.
    fn emit(&self, event: DomainEvent);
}

/// Sink that discards every event, for tests and headless contexts.
#[derive(Clone, Default)]
pub struct NoOpEventSink;

impl DomainEventSink for NoOpEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Collecting sink for tests.
#[derive(Clone, Default)]
pub struct MockEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl DomainEventSink for MockEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn mock_sink_collects_events() {
        let sink = MockEventSink::new();
        assert!(sink.is_empty());

        sink.emit(DomainEvent::nav_updated(100, dec!(0)));
        sink.emit(DomainEvent::positions_changed(vec!["p1".to_string()]));

        assert_eq!(sink.len(), 2);
    }
}
