use std::env;

/// Key under which the default announcement channel id is persisted.
pub const ANNOUNCEMENT_CHANNEL_KEY: &str = "announcement_channel_id";
/// Key under which the poll interval (seconds, as a string) is persisted.
pub const POLL_INTERVAL_KEY: &str = "poll_interval_seconds";

pub const MIN_POLL_INTERVAL_SECS: u64 = 30;
pub const MAX_POLL_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: String,

    pub discord_bot_token: String,

    /// Last-resort delivery channel for a cycle when neither an alert
    /// override nor the announcement-channel setting resolves.
    pub fallback_channel_id: Option<String>,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let database_path = env::var("DATABASE_PATH")
        .unwrap_or_else(|_| "data/alerts.db".to_string());

    let discord_bot_token = env::var("DISCORD_BOT_TOKEN").unwrap_or_default();

    let fallback_channel_id = env::var("FALLBACK_CHANNEL_ID")
        .ok()
        .filter(|s| !s.trim().is_empty());

    Settings {
        database_path,
        discord_bot_token,
        fallback_channel_id,
    }
}
