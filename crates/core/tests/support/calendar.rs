use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crier_core::{CalendarSource, TimeWindow};
use crier_domain::{RawCalendarEvent, Result as DomainResult};

/// In-memory mock for `CalendarSource`.
///
/// Returns whatever batch was last installed with [`set_events`], regardless
/// of the requested window, so tests can script successive reconciliation
/// passes deterministically.
///
/// [`set_events`]: MockCalendarSource::set_events
#[derive(Default, Clone)]
pub struct MockCalendarSource {
    events: Arc<Mutex<Vec<RawCalendarEvent>>>,
    fetch_count: Arc<Mutex<usize>>,
}

impl MockCalendarSource {
    /// Create a new mock seeded with the provided records.
    pub fn new(events: Vec<RawCalendarEvent>) -> Self {
        Self {
            events: Arc::new(Mutex::new(events)),
            fetch_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Replace the batch returned by subsequent fetches.
    pub fn set_events(&self, events: Vec<RawCalendarEvent>) {
        *self.events.lock().unwrap() = events;
    }

    /// Number of fetches observed so far.
    pub fn fetch_count(&self) -> usize {
        *self.fetch_count.lock().unwrap()
    }
}

#[async_trait]
impl CalendarSource for MockCalendarSource {
    async fn fetch_upcoming(&self, _window: TimeWindow) -> DomainResult<Vec<RawCalendarEvent>> {
        *self.fetch_count.lock().unwrap() += 1;
        Ok(self.events.lock().unwrap().clone())
    }
}

/// Convenience constructor for a raw record with every field present.
pub fn raw_event(id: &str, title: &str, start: &str, end: &str) -> RawCalendarEvent {
    RawCalendarEvent {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        start_time: Some(start.to_string()),
        end_time: Some(end.to_string()),
    }
}
