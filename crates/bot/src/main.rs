//! Crier - community calendar announcement bot
//!
//! Main entry point: loads configuration, wires the calendar and Discord
//! adapters into the event tracker, and runs until interrupted.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use crier_core::{EventTracker, TrackerConfig};
use crier_domain::CommunityId;
use crier_infra::{DiscordMessenger, GoogleCalendarSource};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging FIRST so we can see .env loading
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env file"),
        Err(e) => warn!(error = %e, "could not load .env file"),
    }

    let config = crier_infra::config::load().context("failed to load configuration")?;

    let source = Arc::new(GoogleCalendarSource::new(&config.calendar));
    let messenger = Arc::new(
        DiscordMessenger::new(&config).context("failed to construct Discord messenger")?,
    );

    let tracker_config = TrackerConfig {
        poll_interval: Duration::from_secs(config.calendar.check_interval_hours * 60 * 60),
        lookahead: chrono::Duration::weeks(config.calendar.lookahead_weeks),
        ..TrackerConfig::default()
    };
    let tracker = Arc::new(
        EventTracker::new(source, messenger.clone(), &config.notifier, tracker_config)
            .context("failed to construct event tracker")?,
    );

    // The bot serves exactly one community; anything else is a deployment
    // mistake worth failing loudly on.
    let communities = messenger
        .current_communities()
        .await
        .context("failed to list communities the bot belongs to")?;
    let community = match communities.as_slice() {
        [community] => {
            info!(name = %community.name, id = %community.id, "serving community");
            CommunityId::from(community.id.as_str())
        }
        [] => bail!("the bot is not a member of any community"),
        many => bail!("the bot is a member of {} communities; expected exactly one", many.len()),
    };

    tracker.initialize(community).await;

    tokio::signal::ctrl_c().await.context("failed to listen for shutdown signal")?;
    info!("shutdown signal received");
    tracker.shutdown().await;

    Ok(())
}
