//! # Crier Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The event tracking and notification scheduling subsystem
//! - Port/adapter interfaces (traits) for the calendar source and chat client
//! - Dialog generation helpers
//!
//! ## Architecture Principles
//! - Only depends on `crier-domain`
//! - No HTTP or platform code
//! - All external collaborators consumed via traits

pub mod dialog;
pub mod events;

// Re-export specific items to avoid ambiguity
pub use events::ports::{CalendarSource, ChannelMessenger, TimeWindow};
pub use events::tracker::{EventTracker, TrackerConfig};
pub use events::{NotificationKind, NotificationPlan, NotifierContext, TrackedEvent};
