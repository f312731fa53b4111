//! Calendar source adapters.

pub mod google;

pub use google::GoogleCalendarSource;
