//! Port interfaces for the external collaborators the subsystem consumes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crier_domain::{ChannelId, CommunityId, RawCalendarEvent, Result};

/// Half-open time window used when querying the calendar source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Trait for the external calendar data source.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Return raw records for events starting within the given window.
    async fn fetch_upcoming(&self, window: TimeWindow) -> Result<Vec<RawCalendarEvent>>;
}

/// Trait for the chat platform client used to deliver notifications.
#[async_trait]
pub trait ChannelMessenger: Send + Sync {
    /// Resolve a named text channel in the community. `None` when absent.
    async fn resolve_channel(
        &self,
        name: &str,
        community: &CommunityId,
    ) -> Result<Option<ChannelId>>;

    /// Send a sequence of messages with realistic pacing. Fails the whole
    /// call if any send errors.
    async fn send_messages(&self, channel: &ChannelId, messages: &[String]) -> Result<()>;

    /// Send a countdown-timer artifact for the start of an event.
    async fn send_countdown_link(
        &self,
        channel: &ChannelId,
        event_title: &str,
        start_time: DateTime<Utc>,
    ) -> Result<()>;
}
