//! Discord REST adapter for the channel messenger port.

pub mod countdown;
pub mod messenger;
pub mod pacing;

pub use messenger::DiscordMessenger;
