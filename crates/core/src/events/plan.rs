//! Notification schedule computation.
//!
//! A [`NotificationPlan`] is the pure part of scheduling: given an event, the
//! start time of its next recurrence (when known), and the current instant, it
//! decides which notification kinds are due and at what instants they fire.
//! An anchor strictly in the past is skipped, never fired retroactively.

use chrono::{DateTime, Duration, Utc};
use crier_domain::constants::{ANNOUNCEMENT_LEAD_WEEKS, REMINDER_LEAD_DAYS};
use crier_domain::{CalendarEvent, EventCategory};

/// The kinds of notification the subsystem can arm for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Long-range announcement, three weeks before the start.
    Announcement,
    /// Day-before reminder.
    Reminder,
    /// Fired at the event start.
    Start,
    /// Fired at the event end, pointing members at the next recurrence.
    End,
}

/// The fire instants an event's strategy should arm, one per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationPlan {
    pub announcement: Option<DateTime<Utc>>,
    pub reminder: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl NotificationPlan {
    /// Compute the plan for an event, per its category's notification policy.
    pub fn for_event(
        event: &CalendarEvent,
        next_occurrence_start: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        match event.category {
            EventCategory::GameDevDiscussions => {
                Self::for_discussions(event, next_occurrence_start, now)
            }
            EventCategory::GameDevTogether => Self::for_together(event, now),
            EventCategory::General => Self::for_general(event, now),
        }
    }

    /// Recurring discussion sessions: reminder, start, and an end-of-session
    /// notification that is only meaningful when a next recurrence is known.
    fn for_discussions(
        event: &CalendarEvent,
        next_occurrence_start: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            announcement: None,
            reminder: due(now, event.start_time - Duration::days(REMINDER_LEAD_DAYS)),
            start: due(now, event.start_time),
            end: next_occurrence_start.and_then(|_| due(now, event.end_time)),
        }
    }

    /// Recurring co-working sessions only get a start notification.
    fn for_together(event: &CalendarEvent, now: DateTime<Utc>) -> Self {
        Self { start: due(now, event.start_time), ..Self::default() }
    }

    /// One-off events: long-range announcement, reminder, and start.
    fn for_general(event: &CalendarEvent, now: DateTime<Utc>) -> Self {
        Self {
            announcement: due(now, event.start_time - Duration::weeks(ANNOUNCEMENT_LEAD_WEEKS)),
            reminder: due(now, event.start_time - Duration::days(REMINDER_LEAD_DAYS)),
            start: due(now, event.start_time),
            end: None,
        }
    }

    /// The kinds this plan arms, for logging and assertions.
    pub fn armed_kinds(&self) -> Vec<NotificationKind> {
        let mut kinds = Vec::with_capacity(4);
        if self.announcement.is_some() {
            kinds.push(NotificationKind::Announcement);
        }
        if self.reminder.is_some() {
            kinds.push(NotificationKind::Reminder);
        }
        if self.start.is_some() {
            kinds.push(NotificationKind::Start);
        }
        if self.end.is_some() {
            kinds.push(NotificationKind::End);
        }
        kinds
    }
}

/// An anchor is due iff `now` has not passed it yet (inclusive).
fn due(now: DateTime<Utc>, anchor: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (now <= anchor).then_some(anchor)
}
