//! Human-feeling delays applied before and during message delivery.
//!
//! The bot pauses as if thinking of what to say, then "types" at a rate
//! derived from an average words-per-minute figure with some jitter, scaled
//! by message length.

use std::time::Duration;

use crier_domain::constants::{
    AVERAGE_CHARACTERS_PER_WORD, BOT_AVERAGE_WORDS_PER_MINUTE, BOT_MAX_THINKING_TIME_SECS,
    BOT_MAX_WPM_VARIATION,
};
use rand::Rng;

/// Pacing behaviour for a messenger instance.
#[derive(Debug, Clone, Copy)]
pub struct PacingProfile {
    enabled: bool,
}

impl PacingProfile {
    /// Pacing as the community sees it in production.
    pub fn human() -> Self {
        Self { enabled: true }
    }

    /// No delays at all. Used by tests.
    pub fn instant() -> Self {
        Self { enabled: false }
    }

    /// How long to pause before starting to respond.
    pub fn thinking_delay(&self) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let seconds = rand::thread_rng().gen_range(0.0..1.0) * BOT_MAX_THINKING_TIME_SECS as f64;
        Duration::from_secs_f64(seconds)
    }

    /// How long typing a message of the given length appears to take.
    ///
    /// The rate is jittered by up to half the configured variation in either
    /// direction, so successive messages do not land metronomically.
    pub fn typing_delay(&self, message_length: usize) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let jitter = rand::thread_rng().gen_range(0.0..1.0) * BOT_MAX_WPM_VARIATION
            - BOT_MAX_WPM_VARIATION / 2.0;
        let words_per_minute = BOT_AVERAGE_WORDS_PER_MINUTE + jitter;
        let minutes = message_length as f64 / (words_per_minute * AVERAGE_CHARACTERS_PER_WORD);
        Duration::from_secs_f64(minutes * 60.0)
    }
}

impl Default for PacingProfile {
    fn default() -> Self {
        Self::human()
    }
}
