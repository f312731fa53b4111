//! Notification strategy for one-off (general) calendar events.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crier_domain::CalendarEvent;
use tokio::task::JoinHandle;
use tracing::info;

use super::{
    arm_at, deliver, disarm, format_date_and_time, format_time, log_cancellation,
    log_scheduling, log_send_failure, NotificationStrategy, NotifierContext,
};
use crate::dialog;
use crate::events::plan::NotificationPlan;

/// One-off events get a long-range announcement, a day-before reminder, and a
/// start notification.
pub struct GeneralStrategy {
    ctx: Arc<NotifierContext>,
    announcement: Option<JoinHandle<()>>,
    reminder: Option<JoinHandle<()>>,
    start: Option<JoinHandle<()>>,
}

impl GeneralStrategy {
    pub fn new(ctx: Arc<NotifierContext>) -> Self {
        Self { ctx, announcement: None, reminder: None, start: None }
    }
}

impl NotificationStrategy for GeneralStrategy {
    fn schedule_notifications(
        &mut self,
        event: &CalendarEvent,
        _next_occurrence_start: Option<DateTime<Utc>>,
    ) {
        let plan = NotificationPlan::for_event(event, None, Utc::now());

        if let Some(at) = plan.announcement {
            log_scheduling("announcement", event);
            self.announcement =
                Some(arm_at(at, send_announcement(Arc::clone(&self.ctx), event.clone())));
        }
        if let Some(at) = plan.reminder {
            log_scheduling("reminder", event);
            self.reminder = Some(arm_at(at, send_reminder(Arc::clone(&self.ctx), event.clone())));
        }
        if let Some(at) = plan.start {
            log_scheduling("start", event);
            self.start = Some(arm_at(at, send_start(Arc::clone(&self.ctx), event.clone())));
        }
    }

    fn cancel_notifications(&mut self, event: &CalendarEvent) {
        info!(event_id = %event.id, "canceling notifications for general event");
        if disarm(&mut self.announcement) {
            log_cancellation("announcement", event);
        }
        if disarm(&mut self.reminder) {
            log_cancellation("reminder", event);
        }
        if disarm(&mut self.start) {
            log_cancellation("start", event);
        }
    }
}

async fn send_announcement(ctx: Arc<NotifierContext>, event: CalendarEvent) {
    info!(event_id = %event.id, "sending announcement notification for general event");
    let messages = announcement_messages(&event, &ctx);
    if let Err(error) = deliver(&ctx, messages, None).await {
        log_send_failure("announcement", &event.id, &error);
    }
}

async fn send_reminder(ctx: Arc<NotifierContext>, event: CalendarEvent) {
    info!(event_id = %event.id, "sending reminder notification for general event");
    let messages = reminder_messages(&event, &ctx);
    let countdown = Some((event.title.clone(), event.start_time));
    if let Err(error) = deliver(&ctx, messages, countdown).await {
        log_send_failure("reminder", &event.id, &error);
    }
}

async fn send_start(ctx: Arc<NotifierContext>, event: CalendarEvent) {
    info!(event_id = %event.id, "sending start notification for general event");
    let messages = start_messages(&event);
    if let Err(error) = deliver(&ctx, messages, None).await {
        log_send_failure("start", &event.id, &error);
    }
}

fn announcement_messages(event: &CalendarEvent, ctx: &NotifierContext) -> Vec<String> {
    let when = format_date_and_time(event.start_time, ctx.time_zone);
    let options = vec![
        format!(
            "I have an announcement to make. The event {} is approaching. It will start on {when}.",
            event.title
        ),
        format!(
            "I am alerting you of an event that will occur in the near future: {}. This will \
             happen on {when}.",
            event.title
        ),
        format!("Insert data into your calendars for {when}. At this time, {} will occur.", event.title),
    ];
    vec![dialog::choose_phrase(options), dialog::make_robot_noise()]
}

fn reminder_messages(event: &CalendarEvent, ctx: &NotifierContext) -> Vec<String> {
    let at = format_time(event.start_time, ctx.time_zone);
    let options = vec![
        format!("Oh! Hey! {} starts tomorrow at {at}!", event.title),
        format!("You may desire to recall that {} will begin tomorrow at {at}.", event.title),
        format!(
            "I am looking at the calendar and I am seeing {} tomorrow at {at}. Have a nice day.",
            event.title
        ),
    ];
    vec![dialog::choose_phrase(options), dialog::make_robot_noise()]
}

fn start_messages(event: &CalendarEvent) -> Vec<String> {
    let options = vec![
        format!("I thought you might want to know... It is now time for {} to start!", event.title),
        format!("Do not forget! {} is starting now!", event.title),
        format!(
            "The time has come for {} to begin! According to my reasoning capabilities, this \
             information may be useful to you.",
            event.title
        ),
    ];
    vec![dialog::choose_phrase(options), dialog::make_robot_noise()]
}
