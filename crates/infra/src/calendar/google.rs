//! Google Calendar implementation of the calendar source port.

use async_trait::async_trait;
use crier_core::{CalendarSource, TimeWindow};
use crier_domain::{CalendarConfig, CrierError, RawCalendarEvent, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::InfraError;

const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Calendar source backed by the Google Calendar `events.list` endpoint.
///
/// Authenticates with an API key, which is sufficient for public calendars.
/// Recurring events are expanded into individual occurrences on the server
/// side (`singleEvents=true`) so every record carries concrete timestamps.
pub struct GoogleCalendarSource {
    client: Client,
    base_url: String,
    api_key: String,
    calendar_id: String,
}

impl GoogleCalendarSource {
    pub fn new(config: &CalendarConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: GOOGLE_CALENDAR_API_BASE.to_string(),
            api_key: config.api_key.clone(),
            calendar_id: config.calendar_id.clone(),
        }
    }

    /// Point the adapter at a different API base. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CalendarSource for GoogleCalendarSource {
    async fn fetch_upcoming(&self, window: TimeWindow) -> Result<Vec<RawCalendarEvent>> {
        let url = format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(&self.calendar_id)
        );

        let time_min = window.start.to_rfc3339();
        let time_max = window.end.to_rfc3339();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
            ])
            .send()
            .await
            .map_err(InfraError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CrierError::Network(format!(
                "Google Calendar API error ({}): {}",
                status, error_text
            )));
        }

        let google_response: GoogleEventsResponse = response.json().await.map_err(|e| {
            CrierError::InvalidInput(format!("Failed to parse Google Calendar response: {}", e))
        })?;

        debug!(count = google_response.items.len(), "fetched calendar records");

        Ok(google_response
            .items
            .into_iter()
            .map(|GoogleCalendarEvent { id, summary, start, end }| RawCalendarEvent {
                id,
                title: summary,
                start_time: start.and_then(EventDateTime::into_timestamp),
                end_time: end.and_then(EventDateTime::into_timestamp),
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct GoogleEventsResponse {
    #[serde(default)]
    items: Vec<GoogleCalendarEvent>,
}

#[derive(Debug, Deserialize)]
struct GoogleCalendarEvent {
    id: Option<String>,
    summary: Option<String>,
    start: Option<EventDateTime>,
    end: Option<EventDateTime>,
}

/// Either a concrete timestamp or an all-day date, per the API schema.
#[derive(Debug, Deserialize)]
struct EventDateTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    date: Option<String>,
}

impl EventDateTime {
    fn into_timestamp(self) -> Option<String> {
        self.date_time.or(self.date)
    }
}
