//! Integration tests for the event tracking subsystem.
//!
//! These run on a paused tokio clock: armed notification timers auto-advance
//! while the tests await, so deliveries can be observed without real waiting.
//! Wall-clock timestamps still come from `chrono`, so fixtures are built
//! relative to `Utc::now()`.

mod support;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use crier_core::{EventTracker, NotifierContext, TrackedEvent, TrackerConfig};
use crier_domain::{CalendarEvent, CommunityId, NotifierConfig, RawCalendarEvent};
use support::calendar::{raw_event, MockCalendarSource};
use support::messenger::MockChannelMessenger;

fn notifier_config() -> NotifierConfig {
    NotifierConfig {
        announcements_channel: "announcements".to_string(),
        time_zone: "America/Chicago".to_string(),
    }
}

fn build_tracker(
    source: MockCalendarSource,
    messenger: MockChannelMessenger,
) -> Arc<EventTracker> {
    let tracker = EventTracker::new(
        Arc::new(source),
        Arc::new(messenger),
        &notifier_config(),
        TrackerConfig::default(),
    )
    .expect("tracker construction should succeed");
    Arc::new(tracker)
}

fn community() -> CommunityId {
    CommunityId::from("guild-1")
}

/// Raw record for an event with the given offsets from now, in hours.
fn event_in_hours(id: &str, title: &str, start_hours: i64, end_hours: i64) -> RawCalendarEvent {
    let now = Utc::now();
    raw_event(
        id,
        title,
        &(now + Duration::hours(start_hours)).to_rfc3339(),
        &(now + Duration::hours(end_hours)).to_rfc3339(),
    )
}

#[tokio::test(start_paused = true)]
async fn general_event_gets_reminder_and_start_notifications() {
    // Start is ten days out: the three-week announcement anchor is already in
    // the past and must be skipped, leaving the reminder and the start.
    let source = MockCalendarSource::new(vec![event_in_hours(
        "evt-1",
        "Community Game Night",
        10 * 24,
        10 * 24 + 2,
    )]);
    let messenger = MockChannelMessenger::new().with_channel("announcements", "chan-1");

    let tracker = build_tracker(source, messenger.clone());
    tracker.initialize(community()).await;
    assert_eq!(tracker.tracked_ids().await, vec!["evt-1".to_string()]);

    tokio::time::sleep(StdDuration::from_secs(11 * 24 * 60 * 60)).await;

    let batches = messenger.sent_batches();
    assert_eq!(batches.len(), 2, "expected a reminder and a start delivery");
    assert!(batches.iter().all(|batch| !batch.messages.is_empty()));
    assert!(batches.iter().all(|batch| batch.channel.0 == "chan-1"));

    // The reminder carries a countdown link; the start does not.
    let countdowns = messenger.sent_countdowns();
    assert_eq!(countdowns.len(), 1);
    assert_eq!(countdowns[0].event_title, "Community Game Night");

    tracker.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn discussions_end_notification_fires_when_next_occurrence_is_known() {
    // Two occurrences of the recurring discussion session: the imminent one
    // should arm start and end timers, the end firing only because the later
    // occurrence tells it when the next session is.
    let source = MockCalendarSource::new(vec![
        event_in_hours("disc-1", "Game Dev Discussions", 1, 2),
        event_in_hours("disc-2", "Game Dev Discussions", 7 * 24, 7 * 24 + 1),
    ]);
    let messenger = MockChannelMessenger::new().with_channel("announcements", "chan-1");

    let tracker = build_tracker(source, messenger.clone());
    tracker.initialize(community()).await;

    tokio::time::sleep(StdDuration::from_secs(3 * 60 * 60)).await;

    // Start and end for disc-1; disc-2's own notifications are days away.
    let batches = messenger.sent_batches();
    assert_eq!(batches.len(), 2, "expected start and end deliveries");
    assert!(messenger.sent_countdowns().is_empty());

    tracker.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn vanished_future_event_is_dropped_and_its_timers_cancelled() {
    let source = MockCalendarSource::new(vec![event_in_hours(
        "evt-1",
        "Game Dev Together",
        2,
        3,
    )]);
    let messenger = MockChannelMessenger::new().with_channel("announcements", "chan-1");

    let tracker = build_tracker(source.clone(), messenger.clone());
    tracker.initialize(community()).await;
    assert_eq!(tracker.tracked_ids().await, vec!["evt-1".to_string()]);

    // The event disappears from the calendar well before its grace window.
    source.set_events(Vec::new());
    tracker.reconcile().await;
    assert!(tracker.tracked_ids().await.is_empty());

    // Advancing past the original start time must deliver nothing.
    tokio::time::sleep(StdDuration::from_secs(4 * 60 * 60)).await;
    assert!(messenger.sent_batches().is_empty());

    tracker.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn vanished_event_within_grace_window_is_retained() {
    // The session started ten minutes ago; transient calendar hiccups must
    // not untrack an in-progress event.
    let now = Utc::now();
    let source = MockCalendarSource::new(vec![raw_event(
        "evt-1",
        "Game Dev Together",
        &(now - Duration::minutes(10)).to_rfc3339(),
        &(now + Duration::minutes(50)).to_rfc3339(),
    )]);
    let messenger = MockChannelMessenger::new().with_channel("announcements", "chan-1");

    let tracker = build_tracker(source.clone(), messenger.clone());
    tracker.initialize(community()).await;

    source.set_events(Vec::new());
    tracker.reconcile().await;

    assert_eq!(tracker.tracked_ids().await, vec!["evt-1".to_string()]);

    tracker.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn vanished_event_past_grace_window_is_swept() {
    // The session ended two hours ago, so the grace window has closed; once
    // the calendar stops returning it the sweep must drop it.
    let now = Utc::now();
    let source = MockCalendarSource::new(vec![raw_event(
        "evt-1",
        "Game Dev Together",
        &(now - Duration::hours(3)).to_rfc3339(),
        &(now - Duration::hours(2)).to_rfc3339(),
    )]);
    let messenger = MockChannelMessenger::new().with_channel("announcements", "chan-1");

    let tracker = build_tracker(source.clone(), messenger.clone());
    tracker.initialize(community()).await;
    assert_eq!(tracker.tracked_ids().await, vec!["evt-1".to_string()]);

    source.set_events(Vec::new());
    tracker.reconcile().await;
    assert!(tracker.tracked_ids().await.is_empty());

    // Every anchor was already past at tracking time, so nothing fires.
    tokio::time::sleep(StdDuration::from_secs(60 * 60)).await;
    assert!(messenger.sent_batches().is_empty());

    tracker.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn malformed_records_are_skipped_without_poisoning_the_batch() {
    let mut missing_start = event_in_hours("bad-1", "Broken", 5, 6);
    missing_start.start_time = None;
    let source = MockCalendarSource::new(vec![
        missing_start,
        event_in_hours("good-1", "Community Game Night", 5, 6),
    ]);
    let messenger = MockChannelMessenger::new().with_channel("announcements", "chan-1");

    let tracker = build_tracker(source, messenger);
    tracker.initialize(community()).await;

    assert_eq!(tracker.tracked_ids().await, vec!["good-1".to_string()]);

    tracker.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn rescheduled_event_fires_only_at_its_new_time() {
    let source = MockCalendarSource::new(vec![event_in_hours(
        "evt-1",
        "Game Dev Together",
        2,
        3,
    )]);
    let messenger = MockChannelMessenger::new().with_channel("announcements", "chan-1");

    let tracker = build_tracker(source.clone(), messenger.clone());
    tracker.initialize(community()).await;

    // The organizer pushes the session back two hours.
    source.set_events(vec![event_in_hours("evt-1", "Game Dev Together", 4, 5)]);
    tracker.reconcile().await;
    assert_eq!(tracker.tracked_ids().await, vec!["evt-1".to_string()]);

    tokio::time::sleep(StdDuration::from_secs(5 * 60 * 60)).await;

    // Exactly one start delivery: the original timer was cancelled.
    assert_eq!(messenger.sent_batches().len(), 1);

    tracker.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn update_event_debounces_identical_polls() {
    let messenger = MockChannelMessenger::new().with_channel("announcements", "chan-1");
    let ctx = Arc::new(NotifierContext {
        messenger: Arc::new(messenger),
        community: community(),
        announcements_channel: "announcements".to_string(),
        time_zone: "America/Chicago".parse().expect("valid zone"),
    });

    let event = CalendarEvent::try_from(event_in_hours("evt-1", "Game Dev Together", 2, 3))
        .expect("valid event");
    let mut tracked = TrackedEvent::new(ctx, event.clone(), &[]);

    // Identical data must not churn the timers.
    assert!(!tracked.update_event(event.clone(), &[]));

    let mut moved = event;
    moved.start_time += Duration::hours(2);
    moved.end_time += Duration::hours(2);
    assert!(tracked.update_event(moved, &[]));

    tracked.cancel_notifications();
}

#[tokio::test(start_paused = true)]
async fn initialize_is_idempotent() {
    let source = MockCalendarSource::new(Vec::new());
    let messenger = MockChannelMessenger::new();

    let tracker = build_tracker(source.clone(), messenger);
    tracker.initialize(community()).await;
    tracker.initialize(community()).await;

    assert_eq!(source.fetch_count(), 1);

    tracker.shutdown().await;
}
