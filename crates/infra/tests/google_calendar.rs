//! Integration tests for the Google Calendar adapter.

use chrono::{Duration, Utc};
use crier_core::{CalendarSource, TimeWindow};
use crier_domain::{CalendarConfig, CrierError};
use crier_infra::GoogleCalendarSource;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn calendar_config() -> CalendarConfig {
    CalendarConfig {
        api_key: "test-key".to_string(),
        calendar_id: "primary".to_string(),
        check_interval_hours: 24,
        lookahead_weeks: 4,
    }
}

fn window() -> TimeWindow {
    let now = Utc::now();
    TimeWindow { start: now, end: now + Duration::weeks(4) }
}

#[tokio::test]
async fn fetch_upcoming_maps_response_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendars/primary/events"))
        .and(query_param("key", "test-key"))
        .and(query_param("singleEvents", "true"))
        .and(query_param("orderBy", "startTime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": "evt-1",
                    "summary": "Game Dev Discussions",
                    "start": {"dateTime": "2026-09-04T19:00:00-05:00"},
                    "end": {"dateTime": "2026-09-04T20:00:00-05:00"}
                },
                {
                    "id": "evt-2",
                    "summary": "Game Jam",
                    "start": {"date": "2026-09-12"}
                },
                {
                    "id": "evt-3",
                    "start": {"dateTime": "2026-09-20T19:00:00-05:00"},
                    "end": {"dateTime": "2026-09-20T21:00:00-05:00"}
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = GoogleCalendarSource::new(&calendar_config()).with_base_url(server.uri());
    let records = source.fetch_upcoming(window()).await.expect("fetch should succeed");

    assert_eq!(records.len(), 3);

    assert_eq!(records[0].id.as_deref(), Some("evt-1"));
    assert_eq!(records[0].title.as_deref(), Some("Game Dev Discussions"));
    assert_eq!(records[0].start_time.as_deref(), Some("2026-09-04T19:00:00-05:00"));
    assert_eq!(records[0].end_time.as_deref(), Some("2026-09-04T20:00:00-05:00"));

    // All-day events carry only a date, and no end at all here.
    assert_eq!(records[1].start_time.as_deref(), Some("2026-09-12"));
    assert_eq!(records[1].end_time, None);

    // A summary-less record still comes through; validation happens later.
    assert_eq!(records[2].title, None);
}

#[tokio::test]
async fn fetch_upcoming_handles_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendars/primary/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let source = GoogleCalendarSource::new(&calendar_config()).with_base_url(server.uri());
    let records = source.fetch_upcoming(window()).await.expect("fetch should succeed");
    assert!(records.is_empty());
}

#[tokio::test]
async fn fetch_upcoming_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendars/primary/events"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let source = GoogleCalendarSource::new(&calendar_config()).with_base_url(server.uri());
    let error = source.fetch_upcoming(window()).await.expect_err("fetch should fail");
    match error {
        CrierError::Network(msg) => {
            assert!(msg.contains("403"));
            assert!(msg.contains("forbidden"));
        }
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_upcoming_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendars/primary/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let source = GoogleCalendarSource::new(&calendar_config()).with_base_url(server.uri());
    let error = source.fetch_upcoming(window()).await.expect_err("fetch should fail");
    assert!(matches!(error, CrierError::InvalidInput(_)));
}
