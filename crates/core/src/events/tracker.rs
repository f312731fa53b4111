//! The top-level event tracking orchestrator.
//!
//! Polls the calendar source on a fixed delay, reconciles each batch against
//! the currently tracked set, and retires entries once they are gone from the
//! calendar and outside their grace window. The polling loop holds the shape
//! used by the rest of our background workers: a cancellation token, a
//! `tokio::select!` loop, and a join timeout on shutdown.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use crier_domain::constants::{CALENDAR_CHECK_INTERVAL_HOURS, CALENDAR_LOOKAHEAD_WEEKS};
use crier_domain::{
    CalendarEvent, CommunityId, CrierError, EventCategory, NotifierConfig, Result,
};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::ports::{CalendarSource, ChannelMessenger, TimeWindow};
use super::strategies::NotifierContext;
use super::tracked_event::TrackedEvent;

/// Configuration for the event tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Delay between the end of one reconciliation pass and the next.
    pub poll_interval: Duration,
    /// How far ahead of "now" the calendar is queried.
    pub lookahead: chrono::Duration,
    /// Timeout for awaiting the polling task join handle on shutdown.
    pub join_timeout: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(CALENDAR_CHECK_INTERVAL_HOURS * 60 * 60),
            lookahead: chrono::Duration::weeks(CALENDAR_LOOKAHEAD_WEEKS),
            join_timeout: Duration::from_secs(5),
        }
    }
}

struct TrackerState {
    ctx: Option<Arc<NotifierContext>>,
    tracked: HashMap<String, TrackedEvent>,
}

/// Keeps track of calendar events and sends announcements and reminders about
/// them.
pub struct EventTracker {
    source: Arc<dyn CalendarSource>,
    messenger: Arc<dyn ChannelMessenger>,
    announcements_channel: String,
    time_zone: Tz,
    config: TrackerConfig,
    state: Mutex<TrackerState>,
    initialized: AtomicBool,
    cancellation: CancellationToken,
    poll_handle: Mutex<Option<JoinHandle<()>>>,
}

impl EventTracker {
    /// Create a tracker from its collaborators.
    ///
    /// Fails with a configuration error when the notifier time zone is not a
    /// valid IANA zone name.
    pub fn new(
        source: Arc<dyn CalendarSource>,
        messenger: Arc<dyn ChannelMessenger>,
        notifier: &NotifierConfig,
        config: TrackerConfig,
    ) -> Result<Self> {
        let time_zone: Tz = notifier.time_zone.parse().map_err(|_| {
            CrierError::Config(format!("invalid time zone '{}'", notifier.time_zone))
        })?;

        Ok(Self {
            source,
            messenger,
            announcements_channel: notifier.announcements_channel.clone(),
            time_zone,
            config,
            state: Mutex::new(TrackerState { ctx: None, tracked: HashMap::new() }),
            initialized: AtomicBool::new(false),
            cancellation: CancellationToken::new(),
            poll_handle: Mutex::new(None),
        })
    }

    /// Initialize the event tracker against the given community.
    ///
    /// Idempotent: the first call captures the community, performs an initial
    /// reconciliation pass, and arms the polling loop; subsequent calls are
    /// no-ops.
    pub async fn initialize(self: &Arc<Self>, community: CommunityId) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            debug!("event tracker already initialized");
            return;
        }

        info!(community = %community, "initializing event tracker");

        {
            let mut state = self.state.lock().await;
            state.ctx = Some(Arc::new(NotifierContext {
                messenger: Arc::clone(&self.messenger),
                community,
                announcements_channel: self.announcements_channel.clone(),
                time_zone: self.time_zone,
            }));
        }

        self.reconcile().await;

        // Fixed-delay polling: the next pass is only scheduled once the
        // current one has resolved, so passes never overlap.
        let tracker = Arc::clone(self);
        let cancel = self.cancellation.clone();
        let period = self.config.poll_interval;
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!("event polling loop cancelled");
                        break;
                    }
                    _ = tokio::time::sleep(period) => {
                        tracker.reconcile().await;
                    }
                }
            }
        });

        *self.poll_handle.lock().await = Some(handle);
        info!("event tracker started");
    }

    /// Stop the polling loop and cancel every armed notification.
    pub async fn shutdown(&self) {
        self.cancellation.cancel();

        if let Some(handle) = self.poll_handle.lock().await.take() {
            match tokio::time::timeout(self.config.join_timeout, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(join_error)) => warn!(error = %join_error, "polling task join failed"),
                Err(_) => warn!(
                    timeout_secs = self.config.join_timeout.as_secs(),
                    "timed out waiting for polling loop to stop"
                ),
            }
        }

        let mut state = self.state.lock().await;
        for tracked in state.tracked.values_mut() {
            tracked.cancel_notifications();
        }
        state.tracked.clear();
        info!("event tracker stopped");
    }

    /// Run one reconciliation pass against a fresh calendar snapshot.
    ///
    /// Shared by the initial pass and the polling loop; also callable
    /// directly to force a poll.
    pub async fn reconcile(&self) {
        let events = self.fetch_upcoming_events().await;

        let mut state = self.state.lock().await;
        let Some(ctx) = state.ctx.clone() else {
            return;
        };

        // Recurring discussion sessions look across their sibling occurrences
        // to learn when the next one starts.
        let discussion_events: Vec<CalendarEvent> = events
            .iter()
            .filter(|event| event.category == EventCategory::GameDevDiscussions)
            .cloned()
            .collect();

        for event in &events {
            let related: &[CalendarEvent] = match event.category {
                EventCategory::GameDevDiscussions => &discussion_events,
                _ => &[],
            };

            match state.tracked.get_mut(&event.id) {
                Some(tracked) => {
                    if tracked.update_event(event.clone(), related) {
                        debug!(event_id = %event.id, "tracked event rescheduled");
                    }
                }
                None => {
                    state
                        .tracked
                        .insert(event.id.clone(), TrackedEvent::new(Arc::clone(&ctx), event.clone(), related));
                }
            }
        }

        let fetched_ids: HashSet<&str> = events.iter().map(|event| event.id.as_str()).collect();
        let removable: Vec<String> = state
            .tracked
            .values()
            .filter(|tracked| !fetched_ids.contains(tracked.id()) && tracked.can_be_deleted())
            .map(|tracked| tracked.id().to_string())
            .collect();

        for id in removable {
            if let Some(mut tracked) = state.tracked.remove(&id) {
                info!(
                    event_id = %id,
                    "tracked event is no longer on the calendar; event will no longer be tracked"
                );
                tracked.cancel_notifications();
            }
        }
    }

    /// Ids of currently tracked events, sorted for stable assertions.
    pub async fn tracked_ids(&self) -> Vec<String> {
        let state = self.state.lock().await;
        let mut ids: Vec<String> = state.tracked.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Fetch upcoming events within the look-ahead window.
    ///
    /// A source failure yields an empty batch (logged, never propagated), and
    /// individually malformed records are skipped so the rest of the batch is
    /// still ingested.
    async fn fetch_upcoming_events(&self) -> Vec<CalendarEvent> {
        let now = Utc::now();
        let window = TimeWindow { start: now, end: now + self.config.lookahead };

        let records = match self.source.fetch_upcoming(window).await {
            Ok(records) => records,
            Err(error) => {
                error!(error = %error, "an error occurred while retrieving calendar events");
                return Vec::new();
            }
        };

        let mut events = Vec::with_capacity(records.len());
        for record in records {
            match CalendarEvent::try_from(record) {
                Ok(event) => events.push(event),
                Err(error) => {
                    warn!(error = %error, "unable to get information from calendar record");
                }
            }
        }
        events
    }
}
