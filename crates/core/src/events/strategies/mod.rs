//! Notification strategy variants.
//!
//! One strategy type per event category, selected once when an event first
//! becomes tracked. A strategy owns the timer handle for every notification
//! kind it has armed; cancelling aborts and clears whatever is still pending,
//! while a timer that has already fired is fire-and-forget.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use crier_domain::{CalendarEvent, ChannelId, CommunityId, CrierError, EventCategory, Result};
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::ports::ChannelMessenger;

mod discussions;
mod general;
mod together;

pub use discussions::GameDevDiscussionsStrategy;
pub use general::GeneralStrategy;
pub use together::GameDevTogetherStrategy;

/// Shared collaborators a strategy needs to deliver a notification.
pub struct NotifierContext {
    pub messenger: Arc<dyn ChannelMessenger>,
    pub community: CommunityId,
    pub announcements_channel: String,
    pub time_zone: Tz,
}

/// Per-category notification policy.
///
/// `schedule_notifications` arms zero or more timers against "now" at
/// scheduling time; `cancel_notifications` clears every timer the instance
/// currently holds and is safe to call when nothing is armed.
pub trait NotificationStrategy: Send {
    fn schedule_notifications(
        &mut self,
        event: &CalendarEvent,
        next_occurrence_start: Option<DateTime<Utc>>,
    );

    fn cancel_notifications(&mut self, event: &CalendarEvent);
}

/// Select the strategy for an event's category.
pub(crate) fn strategy_for(
    category: EventCategory,
    ctx: Arc<NotifierContext>,
) -> Box<dyn NotificationStrategy> {
    match category {
        EventCategory::GameDevDiscussions => Box::new(GameDevDiscussionsStrategy::new(ctx)),
        EventCategory::GameDevTogether => Box::new(GameDevTogetherStrategy::new(ctx)),
        EventCategory::General => Box::new(GeneralStrategy::new(ctx)),
    }
}

/// Spawn a timer task that fires the notification at the given instant.
///
/// The delay is measured from the moment of arming; callers only arm anchors
/// that are not already in the past.
pub(super) fn arm_at<F>(fire_at: DateTime<Utc>, notification: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let wait = (fire_at - Utc::now()).to_std().unwrap_or(std::time::Duration::ZERO);
        tokio::time::sleep(wait).await;
        notification.await;
    })
}

/// Abort a pending timer, clearing its slot. A handle whose task already fired
/// is aborted harmlessly.
pub(super) fn disarm(slot: &mut Option<JoinHandle<()>>) -> bool {
    match slot.take() {
        Some(handle) => {
            handle.abort();
            true
        }
        None => false,
    }
}

/// Resolve the announcements channel and deliver a notification through it.
///
/// A missing channel fails the delivery; callers log and swallow the error so
/// a failed notification never takes the process down.
pub(super) async fn deliver(
    ctx: &NotifierContext,
    messages: Vec<String>,
    countdown: Option<(String, DateTime<Utc>)>,
) -> Result<()> {
    let channel: ChannelId = ctx
        .messenger
        .resolve_channel(&ctx.announcements_channel, &ctx.community)
        .await?
        .ok_or_else(|| {
            CrierError::NotFound(format!(
                "unable to send message(s) - channel '{}' not found",
                ctx.announcements_channel
            ))
        })?;

    ctx.messenger.send_messages(&channel, &messages).await?;

    if let Some((title, start_time)) = countdown {
        ctx.messenger.send_countdown_link(&channel, &title, start_time).await?;
    }

    Ok(())
}

/// Log a failed notification send with its event context.
pub(super) fn log_send_failure(kind: &str, event_id: &str, error: &CrierError) {
    error!(event_id, error = %error, "unable to send {kind} notification");
}

pub(super) fn log_scheduling(kind: &str, event: &CalendarEvent) {
    info!(event_id = %event.id, event_title = %event.title, "scheduling {kind} notification");
}

pub(super) fn log_cancellation(kind: &str, event: &CalendarEvent) {
    info!(event_id = %event.id, event_title = %event.title, "canceling {kind} notification");
}

/// Render an instant as a long date-and-time in the community time zone,
/// e.g. "March 7 at 6:00 PM Central".
pub(super) fn format_date_and_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%B %-d at %-I:%M %p Central").to_string()
}

/// Render an instant as a short clock time in the community time zone,
/// e.g. "6:00 PM Central".
pub(super) fn format_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%-I:%M %p Central").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn formats_render_in_the_community_time_zone() {
        let tz: Tz = "America/Chicago".parse().unwrap();
        // 2026-03-07 18:00 UTC is 12:00 CST.
        let instant = Utc.with_ymd_and_hms(2026, 3, 7, 18, 0, 0).unwrap();

        assert_eq!(format_date_and_time(instant, tz), "March 7 at 12:00 PM Central");
        assert_eq!(format_time(instant, tz), "12:00 PM Central");
    }

    #[test]
    fn disarm_is_idempotent() {
        let mut slot: Option<JoinHandle<()>> = None;
        assert!(!disarm(&mut slot));
        assert!(!disarm(&mut slot));
    }
}
