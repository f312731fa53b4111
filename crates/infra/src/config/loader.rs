//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CRIER_DISCORD_BOT_TOKEN`: Discord bot token (required)
//! - `CRIER_CALENDAR_API_KEY`: Google Calendar API key (required)
//! - `CRIER_CALENDAR_ID`: Google Calendar id to poll (required)
//! - `CRIER_CHECK_INTERVAL_HOURS`: Hours between calendar polls (optional)
//! - `CRIER_LOOKAHEAD_WEEKS`: Calendar query look-ahead in weeks (optional)
//! - `CRIER_ANNOUNCEMENTS_CHANNEL`: Channel name notifications go to (optional)
//! - `CRIER_TIME_ZONE`: IANA time zone events are rendered in (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./crier.json` or `./crier.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use crier_domain::{
    constants, CalendarConfig, Config, CrierError, DiscordConfig, NotifierConfig, Result,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CrierError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    // Try loading from environment first
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            // Fall back to file
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The bot token, calendar API key, and calendar id are required; everything
/// else falls back to the domain defaults.
///
/// # Errors
/// Returns `CrierError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let bot_token = env_var("CRIER_DISCORD_BOT_TOKEN")?;
    let api_key = env_var("CRIER_CALENDAR_API_KEY")?;
    let calendar_id = env_var("CRIER_CALENDAR_ID")?;

    let check_interval_hours = env_parse_or(
        "CRIER_CHECK_INTERVAL_HOURS",
        constants::CALENDAR_CHECK_INTERVAL_HOURS,
    )?;
    let lookahead_weeks =
        env_parse_or("CRIER_LOOKAHEAD_WEEKS", constants::CALENDAR_LOOKAHEAD_WEEKS)?;

    let announcements_channel = std::env::var("CRIER_ANNOUNCEMENTS_CHANNEL")
        .unwrap_or_else(|_| constants::ANNOUNCEMENTS_CHANNEL_NAME.to_string());
    let time_zone = std::env::var("CRIER_TIME_ZONE")
        .unwrap_or_else(|_| constants::COMMUNITY_TIME_ZONE.to_string());

    Ok(Config {
        discord: DiscordConfig { bot_token },
        calendar: CalendarConfig { api_key, calendar_id, check_interval_hours, lookahead_weeks },
        notifier: NotifierConfig { announcements_channel, time_zone },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CrierError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CrierError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CrierError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CrierError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CrierError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CrierError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CrierError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, up to two parent directories, and
/// the executable's directory for `config.{json,toml}` or `crier.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("crier.json"),
            cwd.join("crier.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("crier.json"),
                exe_dir.join("crier.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| CrierError::Config(format!("Missing required environment variable: {}", key)))
}

/// Parse an optional numeric environment variable, defaulting when unset.
fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| CrierError::Config(format!("Invalid value for {}: {}", key, raw))),
        Err(_) => Ok(default),
    }
}
