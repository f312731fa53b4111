//! Countdown timer links for event start times.
//!
//! Links point at globaltimekeeper.com with the event start rendered in the
//! community time zone, so everyone lands on the same ticking clock no matter
//! where they are.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;

const COUNTDOWN_BASE_URL: &str = "https://globaltimekeeper.com/countdown.php";
const COUNTDOWN_SUBTITLE: &str = "Time until event begins:";

/// Markdown link to a countdown timer for the given event start.
pub fn countdown_timer_link(
    link_text: &str,
    timer_title: &str,
    start_time: DateTime<Utc>,
    zone: Tz,
) -> String {
    let local = start_time.with_timezone(&zone);
    let url = format!(
        "{}?yr={}&mo={}&dy={}&hr={}&mi={}&tz={}&tx1={}&tx2={}&ad=0&ln=en&cl=2&bg=3",
        COUNTDOWN_BASE_URL,
        local.year(),
        local.month(),
        local.day(),
        local.hour(),
        local.minute(),
        urlencoding::encode(zone.name()),
        urlencoding::encode(timer_title),
        urlencoding::encode(COUNTDOWN_SUBTITLE),
    );
    format!("[{}]({})", link_text, url)
}

/// Embed description carrying the countdown link for an event.
pub fn countdown_embed_description(
    event_title: &str,
    start_time: DateTime<Utc>,
    zone: Tz,
) -> String {
    let local = start_time.with_timezone(&zone);
    let link_text =
        format!("{} - {} Central", event_title, local.format("%-m/%-d/%Y, %-I:%M %p"));
    let link = countdown_timer_link(&link_text, event_title, start_time, zone);
    format!("**{}**\nClick the link above to see a countdown timer for the start of the event.", link)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::Chicago;

    use super::*;

    fn sample_start() -> DateTime<Utc> {
        // 18:00 UTC is noon in Chicago during CST.
        Utc.with_ymd_and_hms(2026, 3, 7, 18, 0, 0).single().unwrap()
    }

    #[test]
    fn link_renders_zone_adjusted_fields() {
        let link = countdown_timer_link("text", "Game Night", sample_start(), Chicago);
        assert!(link.starts_with("[text](https://globaltimekeeper.com/countdown.php?"));
        assert!(link.contains("yr=2026"));
        assert!(link.contains("mo=3"));
        assert!(link.contains("dy=7"));
        assert!(link.contains("hr=12"));
        assert!(link.contains("mi=0"));
        assert!(link.contains("tz=America%2FChicago"));
        assert!(link.contains("tx1=Game%20Night"));
        assert!(link.contains("tx2=Time%20until%20event%20begins%3A"));
    }

    #[test]
    fn embed_description_wraps_link_in_bold() {
        let description = countdown_embed_description("Game Night", sample_start(), Chicago);
        assert!(description.starts_with("**[Game Night - 3/7/2026, 12:00 PM Central]"));
        assert!(description.ends_with(
            "Click the link above to see a countdown timer for the start of the event."
        ));
    }
}
