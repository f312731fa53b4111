//! Core domain data types for calendar event tracking.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    EVENT_GRACE_WINDOW_HOURS, GAME_DEV_DISCUSSIONS_TITLE, GAME_DEV_TOGETHER_TITLE,
};
use crate::errors::CrierError;

/// Identifier of the community (guild) the bot announces to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommunityId(pub String);

impl std::fmt::Display for CommunityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CommunityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of a text channel within a community.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Classification of a calendar event, used to select its notification policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    GameDevDiscussions,
    GameDevTogether,
    General,
}

impl EventCategory {
    /// Derive the category from the calendar title. Only exact matches select
    /// a recurring-session category; everything else is a one-off event.
    pub fn from_title(title: &str) -> Self {
        if title == GAME_DEV_DISCUSSIONS_TITLE {
            Self::GameDevDiscussions
        } else if title == GAME_DEV_TOGETHER_TITLE {
            Self::GameDevTogether
        } else {
            Self::General
        }
    }

    /// Stable label for structured logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GameDevDiscussions => "game_dev_discussions",
            Self::GameDevTogether => "game_dev_together",
            Self::General => "general",
        }
    }
}

/// Wire-shaped calendar record as returned by a calendar source, before
/// validation. Any field may be absent in provider data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCalendarEvent {
    pub id: Option<String>,
    pub title: Option<String>,
    /// RFC 3339 start instant.
    pub start_time: Option<String>,
    /// RFC 3339 end instant.
    pub end_time: Option<String>,
}

/// Immutable snapshot of one calendar occurrence.
///
/// Equality is structural over (id, title, start, end); the derived category
/// is a pure function of the title and does not affect identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub category: EventCategory,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl CalendarEvent {
    /// Check whether `now` is within one hour before the start or after the
    /// end of the event: `[start - 1h, end + 1h)`, start-inclusive.
    ///
    /// This predicate is the sole authority for whether an event that has
    /// vanished from the calendar source is still relevant enough to keep
    /// tracking across the next poll.
    pub fn is_within_one_hour_of_event(&self, now: DateTime<Utc>) -> bool {
        let grace = Duration::hours(EVENT_GRACE_WINDOW_HOURS);
        now >= self.start_time - grace && now < self.end_time + grace
    }
}

impl TryFrom<RawCalendarEvent> for CalendarEvent {
    type Error = CrierError;

    fn try_from(raw: RawCalendarEvent) -> Result<Self, Self::Error> {
        let missing = |field: &str| {
            CrierError::InvalidEventData(format!(
                "calendar record does not contain enough information to track it (missing {field})"
            ))
        };

        let id = raw.id.filter(|id| !id.is_empty()).ok_or_else(|| missing("id"))?;
        let title = raw.title.filter(|t| !t.is_empty()).ok_or_else(|| missing("title"))?;
        let start_time = parse_instant(raw.start_time, "start time")?;
        let end_time = parse_instant(raw.end_time, "end time")?;

        if start_time >= end_time {
            return Err(CrierError::InvalidEventData(format!(
                "calendar record has a start time at or after its end time (id {id})"
            )));
        }

        Ok(Self { category: EventCategory::from_title(&title), id, title, start_time, end_time })
    }
}

fn parse_instant(value: Option<String>, field: &str) -> Result<DateTime<Utc>, CrierError> {
    let value = value.filter(|v| !v.is_empty()).ok_or_else(|| {
        CrierError::InvalidEventData(format!(
            "calendar record does not contain enough information to track it (missing {field})"
        ))
    })?;

    DateTime::parse_from_rfc3339(&value).map(|dt| dt.with_timezone(&Utc)).map_err(|e| {
        CrierError::InvalidEventData(format!("invalid {field} '{value}': {e}"))
    })
}
