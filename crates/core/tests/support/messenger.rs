use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crier_core::ChannelMessenger;
use crier_domain::{ChannelId, CommunityId, Result as DomainResult};

/// A single batch of messages delivered through the mock.
#[derive(Debug, Clone)]
pub struct SentBatch {
    pub channel: ChannelId,
    pub messages: Vec<String>,
}

/// A countdown-link delivery observed by the mock.
#[derive(Debug, Clone)]
pub struct SentCountdown {
    pub channel: ChannelId,
    pub event_title: String,
    pub start_time: DateTime<Utc>,
}

/// In-memory mock for `ChannelMessenger`.
///
/// Records every delivery so tests can assert on what was sent and when.
/// Channel resolution succeeds for whatever names were registered with
/// [`with_channel`]; everything else resolves to `None`.
///
/// [`with_channel`]: MockChannelMessenger::with_channel
#[derive(Default, Clone)]
pub struct MockChannelMessenger {
    channels: Arc<Mutex<Vec<(String, ChannelId)>>>,
    sent: Arc<Mutex<Vec<SentBatch>>>,
    countdowns: Arc<Mutex<Vec<SentCountdown>>>,
}

impl MockChannelMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolvable channel name.
    pub fn with_channel(self, name: &str, id: &str) -> Self {
        self.channels
            .lock()
            .unwrap()
            .push((name.to_string(), ChannelId::from(id)));
        self
    }

    /// Every message batch delivered so far, in order.
    pub fn sent_batches(&self) -> Vec<SentBatch> {
        self.sent.lock().unwrap().clone()
    }

    /// Every countdown link delivered so far, in order.
    pub fn sent_countdowns(&self) -> Vec<SentCountdown> {
        self.countdowns.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelMessenger for MockChannelMessenger {
    async fn resolve_channel(
        &self,
        name: &str,
        _community: &CommunityId,
    ) -> DomainResult<Option<ChannelId>> {
        Ok(self
            .channels
            .lock()
            .unwrap()
            .iter()
            .find(|(channel_name, _)| channel_name == name)
            .map(|(_, id)| id.clone()))
    }

    async fn send_messages(&self, channel: &ChannelId, messages: &[String]) -> DomainResult<()> {
        self.sent.lock().unwrap().push(SentBatch {
            channel: channel.clone(),
            messages: messages.to_vec(),
        });
        Ok(())
    }

    async fn send_countdown_link(
        &self,
        channel: &ChannelId,
        event_title: &str,
        start_time: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.countdowns.lock().unwrap().push(SentCountdown {
            channel: channel.clone(),
            event_title: event_title.to_string(),
            start_time,
        });
        Ok(())
    }
}
