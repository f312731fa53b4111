//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    pub calendar: CalendarConfig,
    pub notifier: NotifierConfig,
}

/// Discord REST configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    #[serde(skip_serializing)]
    pub bot_token: String,
}

/// Calendar source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub calendar_id: String,
    pub check_interval_hours: u64,
    pub lookahead_weeks: i64,
}

/// Notification rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    pub announcements_channel: String,
    /// IANA time zone events are rendered in for the community.
    pub time_zone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig { bot_token: String::new() },
            calendar: CalendarConfig {
                api_key: String::new(),
                calendar_id: String::new(),
                check_interval_hours: constants::CALENDAR_CHECK_INTERVAL_HOURS,
                lookahead_weeks: constants::CALENDAR_LOOKAHEAD_WEEKS,
            },
            notifier: NotifierConfig {
                announcements_channel: constants::ANNOUNCEMENTS_CHANNEL_NAME.to_string(),
                time_zone: constants::COMMUNITY_TIME_ZONE.to_string(),
            },
        }
    }
}
