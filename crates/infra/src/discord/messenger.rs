//! Discord REST implementation of the channel messenger port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use crier_core::ChannelMessenger;
use crier_domain::{ChannelId, CommunityId, Config, CrierError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::countdown::countdown_embed_description;
use super::pacing::PacingProfile;
use crate::errors::InfraError;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Discord channel type for a guild text channel.
const GUILD_TEXT_CHANNEL: u8 = 0;

/// A guild the bot is a member of.
#[derive(Debug, Clone, Deserialize)]
pub struct CommunitySummary {
    pub id: String,
    pub name: String,
}

/// Messenger that talks to the Discord REST API with a bot token.
///
/// Message delivery is paced to feel human: a thinking pause before each
/// message, then a typing indicator held for a duration derived from the
/// message length.
pub struct DiscordMessenger {
    client: Client,
    base_url: String,
    bot_token: String,
    time_zone: Tz,
    pacing: PacingProfile,
}

impl DiscordMessenger {
    /// Build a messenger from the application configuration.
    ///
    /// Fails with a configuration error when the configured time zone is not
    /// a valid IANA zone name.
    pub fn new(config: &Config) -> Result<Self> {
        let time_zone: Tz = config.notifier.time_zone.parse().map_err(|_| {
            CrierError::Config(format!("invalid time zone '{}'", config.notifier.time_zone))
        })?;

        Ok(Self {
            client: Client::new(),
            base_url: DISCORD_API_BASE.to_string(),
            bot_token: config.discord.bot_token.clone(),
            time_zone,
            pacing: PacingProfile::default(),
        })
    }

    /// Point the messenger at a different API base. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the pacing profile. Used by tests.
    pub fn with_pacing(mut self, pacing: PacingProfile) -> Self {
        self.pacing = pacing;
        self
    }

    /// The guilds the bot account currently belongs to.
    pub async fn current_communities(&self) -> Result<Vec<CommunitySummary>> {
        let url = format!("{}/users/@me/guilds", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(InfraError::from)?;

        let response = Self::check_status(response, "list guilds").await?;
        response
            .json::<Vec<CommunitySummary>>()
            .await
            .map_err(|e| CrierError::InvalidInput(format!("Failed to parse guild list: {}", e)))
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.bot_token)
    }

    async fn check_status(
        response: reqwest::Response,
        operation: &str,
    ) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        Err(CrierError::Network(format!(
            "Discord API error during {} ({}): {}",
            operation, status, error_text
        )))
    }

    /// Show the typing indicator, wait out the typing delay, then post.
    async fn send_message(&self, channel: &ChannelId, content: &str) -> Result<()> {
        let typing_url = format!("{}/channels/{}/typing", self.base_url, channel);
        let response = self
            .client
            .post(&typing_url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(InfraError::from)?;
        Self::check_status(response, "typing indicator").await?;

        tokio::time::sleep(self.pacing.typing_delay(content.len())).await;

        let message_url = format!("{}/channels/{}/messages", self.base_url, channel);
        let response = self
            .client
            .post(&message_url)
            .header("Authorization", self.auth_header())
            .json(&json!({ "content": content }))
            .send()
            .await
            .map_err(InfraError::from)?;
        Self::check_status(response, "message send").await?;
        Ok(())
    }
}

#[async_trait]
impl ChannelMessenger for DiscordMessenger {
    async fn resolve_channel(
        &self,
        name: &str,
        community: &CommunityId,
    ) -> Result<Option<ChannelId>> {
        let url = format!("{}/guilds/{}/channels", self.base_url, community);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(InfraError::from)?;

        let response = Self::check_status(response, "channel listing").await?;
        let channels: Vec<GuildChannel> = response.json().await.map_err(|e| {
            CrierError::InvalidInput(format!("Failed to parse channel list: {}", e))
        })?;

        let found = channels
            .into_iter()
            .find(|channel| channel.kind == GUILD_TEXT_CHANNEL && channel.name == name)
            .map(|channel| ChannelId(channel.id));

        if found.is_none() {
            warn!(channel_name = name, "unable to find channel");
        }
        Ok(found)
    }

    async fn send_messages(&self, channel: &ChannelId, messages: &[String]) -> Result<()> {
        for message in messages {
            tokio::time::sleep(self.pacing.thinking_delay()).await;
            self.send_message(channel, message).await?;
        }
        debug!(channel = %channel, count = messages.len(), "messages sent");
        Ok(())
    }

    async fn send_countdown_link(
        &self,
        channel: &ChannelId,
        event_title: &str,
        start_time: DateTime<Utc>,
    ) -> Result<()> {
        let description = countdown_embed_description(event_title, start_time, self.time_zone);

        tokio::time::sleep(self.pacing.thinking_delay()).await;

        let url = format!("{}/channels/{}/messages", self.base_url, channel);
        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&json!({ "embeds": [{ "description": description }] }))
            .send()
            .await
            .map_err(InfraError::from)?;
        Self::check_status(response, "countdown embed send").await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct GuildChannel {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: u8,
}
