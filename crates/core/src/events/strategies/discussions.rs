//! Notification strategy for the recurring "Game Dev Discussions" sessions.

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

/// Discussion sessions get a day-before reminder, a start notification, and an
/// end-of-session notification that points members at the next recurrence.
/// The end notification is only armed when the next start time is known; its
/// message generation takes the next start as a required value, so an armed
/// end timer can never fire without one.
pub struct GameDevDiscussionsStrategy {
    ctx: Arc<NotifierContext>,
    reminder: Option<JoinHandle<()>>,
    start: Option<JoinHandle<()>>,
    end: Option<JoinHandle<()>>,
}

impl GameDevDiscussionsStrategy {
    pub fn new(ctx: Arc<NotifierContext>) -> Self {
        Self { ctx, reminder: None, start: None, end: None }
    }
}

impl NotificationStrategy for GameDevDiscussionsStrategy {
    fn schedule_notifications(
        &mut self,
        event: &CalendarEvent,
        next_occurrence_start: Option<DateTime<Utc>>,
    ) {
        let plan = NotificationPlan::for_event(event, next_occurrence_start, Utc::now());

        if let Some(at) = plan.reminder {
            log_scheduling("reminder", event);
            self.reminder = Some(arm_at(at, send_reminder(Arc::clone(&self.ctx), event.clone())));
        }
        if let Some(at) = plan.start {
            log_scheduling("start", event);
            self.start = Some(arm_at(at, send_start(Arc::clone(&self.ctx), event.clone())));
        }
        if let (Some(at), Some(next_start)) = (plan.end, next_occurrence_start) {
            log_scheduling("end", event);
            self.end =
                Some(arm_at(at, send_end(Arc::clone(&self.ctx), event.clone(), next_start)));
        }
    }

    fn cancel_notifications(&mut self, event: &CalendarEvent) {
        info!(event_id = %event.id, event_title = %event.title, "canceling notifications");
        if disarm(&mut self.reminder) {
            log_cancellation("reminder", event);
        }
        if disarm(&mut self.start) {
            log_cancellation("start", event);
        }
        if disarm(&mut self.end) {
            log_cancellation("end", event);
        }
    }
}

async fn send_reminder(ctx: Arc<NotifierContext>, event: CalendarEvent) {
    info!(event_id = %event.id, event_title = %event.title, "sending reminder notification");
    let messages = reminder_messages(&event, &ctx);
    let countdown = Some((event.title.clone(), event.start_time));
    if let Err(error) = deliver(&ctx, messages, countdown).await {
        log_send_failure("reminder", &event.id, &error);
    }
}

async fn send_start(ctx: Arc<NotifierContext>, event: CalendarEvent) {
    info!(event_id = %event.id, event_title = %event.title, "sending start notification");
    let messages = start_messages(&event);
    if let Err(error) = deliver(&ctx, messages, None).await {
        log_send_failure("start", &event.id, &error);
    }
}

async fn send_end(
    ctx: Arc<NotifierContext>,
    event: CalendarEvent,
    next_occurrence_start: DateTime<Utc>,
) {
    info!(event_id = %event.id, event_title = %event.title, "sending end notification");
    let messages = end_messages(&event, next_occurrence_start, &ctx);
    if let Err(error) = deliver(&ctx, messages, None).await {
        log_send_failure("end", &event.id, &error);
    }
}

fn reminder_messages(event: &CalendarEvent, ctx: &NotifierContext) -> Vec<String> {
    let at = format_time(event.start_time, ctx.time_zone);
    let options = vec![
        format!(
            "@everyone, {} is tomorrow at {at}. Do not forget about it. (Unless you want to.)",
            event.title
        ),
        format!(
            "ATTENTION @everyone: Please remember to join us tomorrow at {at} for {}. That is all.",
            event.title
        ),
        format!(
            "Oh! @everyone! The next {} is tomorrow at {at}. I am feeling the anticipation!",
            event.title
        ),
    ];
    vec![dialog::choose_phrase(options), dialog::make_robot_noise()]
}

fn start_messages(event: &CalendarEvent) -> Vec<String> {
    let intro_options = vec![
        format!("Prepare yourselves! It is time for {}.", event.title),
        format!("Just in case you may have forgotten... {} is starting right now!", event.title),
        format!("Oh. Wow. It is time for {}!", event.title),
    ];
    let join = "Please join using the General voice channel.";
    let outro_options = vec![
        "I look forward to learning more about game development from you all.".to_string(),
        "I do hope someone has some cool new stuff to show us!".to_string(),
        format!(
            "Even if you cannot think of anything to discuss, you will still be able to bask in \
             glorious silence together. {}",
            dialog::make_robot_noise()
        ),
    ];
    vec![
        format!("{} {} {join}", dialog::choose_phrase(intro_options), dialog::make_robot_noise()),
        dialog::choose_phrase(outro_options),
    ]
}

fn end_messages(
    event: &CalendarEvent,
    next_occurrence_start: DateTime<Utc>,
    ctx: &NotifierContext,
) -> Vec<String> {
    let next = format_date_and_time(next_occurrence_start, ctx.time_zone);
    let closing_options = vec![
        format!("Thank you for joining {} today.", event.title),
        format!("I am so glad you could make it to today's {} event.", event.title),
        format!("It was good to see you all at {} today.", event.title),
    ];
    let next_options = vec![
        format!("I hope you can make it to the next one on {next}."),
        format!("See you next time on {next}!"),
        format!("The next one will be on {next}. Please store this information in your data banks."),
    ];
    vec![
        format!("{} {}", dialog::choose_phrase(closing_options), dialog::make_robot_noise()),
        dialog::choose_phrase(next_options),
    ]
}
