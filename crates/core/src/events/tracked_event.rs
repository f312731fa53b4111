//! A calendar event that is being tracked in order to provide notifications.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crier_domain::CalendarEvent;
use tracing::info;

use super::strategies::{strategy_for, NotificationStrategy, NotifierContext};

/// Binds one calendar event snapshot to its active notification strategy.
///
/// The strategy is chosen by category at construction and never swapped; it is
/// only reset with new data when the event materially changes.
pub struct TrackedEvent {
    event: CalendarEvent,
    next_occurrence_start: Option<DateTime<Utc>>,
    strategy: Box<dyn NotificationStrategy>,
}

impl TrackedEvent {
    /// Start tracking an event, arming its notifications.
    ///
    /// `related_events` are the other occurrences of the same category from
    /// the same poll; they are used to derive the next recurrence's start.
    pub fn new(
        ctx: Arc<NotifierContext>,
        event: CalendarEvent,
        related_events: &[CalendarEvent],
    ) -> Self {
        let next_occurrence_start = next_occurrence_start(&event, related_events);

        info!(
            event_id = %event.id,
            event_title = %event.title,
            category = event.category.as_str(),
            next_occurrence = ?next_occurrence_start,
            "creating new event notifier"
        );

        let mut strategy = strategy_for(event.category, ctx);
        strategy.schedule_notifications(&event, next_occurrence_start);

        Self { event, next_occurrence_start, strategy }
    }

    pub fn id(&self) -> &str {
        &self.event.id
    }

    pub fn event(&self) -> &CalendarEvent {
        &self.event
    }

    pub fn next_occurrence_start(&self) -> Option<DateTime<Utc>> {
        self.next_occurrence_start
    }

    /// Replace the stored snapshot if the fresh poll differs from it.
    ///
    /// Rescheduling cancels and re-arms timers, so byte-identical polls (the
    /// common case) are debounced into a no-op. Returns whether a reschedule
    /// happened.
    pub fn update_event(
        &mut self,
        event: CalendarEvent,
        related_events: &[CalendarEvent],
    ) -> bool {
        let next_occurrence_start = next_occurrence_start(&event, related_events);
        if event == self.event && next_occurrence_start == self.next_occurrence_start {
            return false;
        }

        info!(
            event_id = %event.id,
            event_title = %event.title,
            next_occurrence = ?next_occurrence_start,
            "updating event notifier with new event details"
        );

        self.strategy.cancel_notifications(&self.event);
        self.event = event;
        self.next_occurrence_start = next_occurrence_start;
        self.strategy.schedule_notifications(&self.event, self.next_occurrence_start);
        true
    }

    /// An entry may be dropped only once the current time is outside the
    /// event's grace window.
    pub fn can_be_deleted(&self) -> bool {
        !self.event.is_within_one_hour_of_event(Utc::now())
    }

    /// Cancel any currently scheduled notifications.
    pub fn cancel_notifications(&mut self) {
        self.strategy.cancel_notifications(&self.event);
    }
}

/// The start time of the next recurrence: the minimum related start strictly
/// after this event's own start, if any.
fn next_occurrence_start(
    event: &CalendarEvent,
    related_events: &[CalendarEvent],
) -> Option<DateTime<Utc>> {
    related_events
        .iter()
        .map(|related| related.start_time)
        .filter(|start| *start > event.start_time)
        .min()
}
