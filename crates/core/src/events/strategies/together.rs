//! Notification strategy for the recurring "Game Dev Together" sessions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crier_domain::CalendarEvent;
use tokio::task::JoinHandle;
use tracing::info;

use super::{
    arm_at, deliver, disarm, log_cancellation, log_scheduling, log_send_failure,
    NotificationStrategy, NotifierContext,
};
use crate::dialog;
use crate::events::plan::NotificationPlan;

/// Co-working sessions only announce their start.
pub struct GameDevTogetherStrategy {
    ctx: Arc<NotifierContext>,
    start: Option<JoinHandle<()>>,
}

impl GameDevTogetherStrategy {
    pub fn new(ctx: Arc<NotifierContext>) -> Self {
        Self { ctx, start: None }
    }
}

impl NotificationStrategy for GameDevTogetherStrategy {
    fn schedule_notifications(
        &mut self,
        event: &CalendarEvent,
        _next_occurrence_start: Option<DateTime<Utc>>,
    ) {
        let plan = NotificationPlan::for_event(event, None, Utc::now());

        if let Some(at) = plan.start {
            log_scheduling("start", event);
            self.start = Some(arm_at(at, send_start(Arc::clone(&self.ctx), event.clone())));
        }
    }

    fn cancel_notifications(&mut self, event: &CalendarEvent) {
        info!(event_id = %event.id, event_title = %event.title, "canceling notifications");
        if disarm(&mut self.start) {
            log_cancellation("start", event);
        }
    }
}

async fn send_start(ctx: Arc<NotifierContext>, event: CalendarEvent) {
    info!(event_id = %event.id, event_title = %event.title, "sending start notification");
    let messages = start_messages(&event);
    if let Err(error) = deliver(&ctx, messages, None).await {
        log_send_failure("start", &event.id, &error);
    }
}

fn start_messages(event: &CalendarEvent) -> Vec<String> {
    let intro_options = vec![
        format!("It is time for {} to start!", event.title),
        format!("{} is starting right at this very moment!", event.title),
        format!("Oh?! It is already time for {}!", event.title),
    ];
    let join = "Please join using the General voice channel.";
    let outro_options = vec![
        "I am looking forward to seeing what you all create today.".to_string(),
        "I cannot wait to see what you humans create next.".to_string(),
        "According to Wikipedia, humans can increase motivation by participating in activities \
         within social groups. Fascinating!"
            .to_string(),
    ];
    vec![
        format!("{} {} {join}", dialog::choose_phrase(intro_options), dialog::make_robot_noise()),
        dialog::choose_phrase(outro_options),
    ]
}
