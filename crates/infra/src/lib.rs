//! # Crier Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The Google Calendar adapter for the calendar source port
//! - The Discord REST adapter for the channel messenger port
//! - Configuration loading (environment variables and files)
//!
//! ## Architecture
//! - Implements traits defined in `crier-core`
//! - Depends on `crier-domain` and `crier-core`
//! - Contains all "impure" code (HTTP, clocks, environment)

pub mod calendar;
pub mod config;
pub mod discord;
pub mod errors;

// Re-export commonly used items
pub use calendar::GoogleCalendarSource;
pub use discord::DiscordMessenger;
pub use errors::InfraError;
