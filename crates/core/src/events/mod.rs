//! Event tracking and notification scheduling.
//!
//! The subsystem polls a calendar source, reconciles the result against the
//! currently tracked set of events, and keeps per-event notification timers
//! armed for whatever is still upcoming. See [`tracker::EventTracker`] for the
//! top-level orchestrator.

pub mod plan;
pub mod ports;
pub mod strategies;
pub mod tracked_event;
pub mod tracker;

pub use plan::{NotificationKind, NotificationPlan};
pub use strategies::NotifierContext;
pub use tracked_event::TrackedEvent;
