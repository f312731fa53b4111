//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Event tracking
pub const CALENDAR_CHECK_INTERVAL_HOURS: u64 = 24;
pub const CALENDAR_LOOKAHEAD_WEEKS: i64 = 4;
pub const EVENT_GRACE_WINDOW_HOURS: i64 = 1;

// Notification anchors, relative to the event start
pub const ANNOUNCEMENT_LEAD_WEEKS: i64 = 3;
pub const REMINDER_LEAD_DAYS: i64 = 1;

// Exact calendar titles that select a recurring-session category
pub const GAME_DEV_DISCUSSIONS_TITLE: &str = "Game Dev Discussions";
pub const GAME_DEV_TOGETHER_TITLE: &str = "Game Dev Together";

// Message pacing simulation
pub const BOT_MAX_THINKING_TIME_SECS: u64 = 5;
pub const BOT_AVERAGE_WORDS_PER_MINUTE: f64 = 120.0;
pub const BOT_MAX_WPM_VARIATION: f64 = 30.0;
pub const AVERAGE_CHARACTERS_PER_WORD: f64 = 5.0;

// Channel names
pub const ANNOUNCEMENTS_CHANNEL_NAME: &str = "announcements";

// Community time zone used when rendering event times in messages. Rendered
// times carry a literal "Central" suffix, so a different configured zone will
// still be labelled Central until the message templates are reworked.
pub const COMMUNITY_TIME_ZONE: &str = "America/Chicago";
