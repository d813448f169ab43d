//! Configuration module.
//!
//! Loads configuration from environment variables into a single value object
//! constructed once at startup. Components receive it explicitly; nothing in
//! the business logic reads the environment at point of use.

use std::env;

/// Bot running mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotMode {
    Polling,
    Webhook,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub bot_mode: BotMode,
    pub webhook_url: Option<String>,
    pub webhook_port: u16,
    pub webhook_secret: Option<String>,

    /// Owner user IDs (comma-separated). Owners may run /reload_cache.
    pub owner_ids: Vec<u64>,

    /// Chat receiving operational log lines. Disabled when unset.
    pub log_chat_id: Option<i64>,

    /// Chat receiving local-ban reports with the global-ban escalation
    /// button. Disabled when unset.
    pub global_log_chat_id: Option<i64>,

    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_database: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if required environment variables are not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bot_mode = env::var("BOT_MODE")
            .unwrap_or_else(|_| "polling".to_string())
            .to_lowercase();

        let bot_mode = match bot_mode.as_str() {
            "webhook" => BotMode::Webhook,
            _ => BotMode::Polling,
        };

        let webhook_url = env::var("WEBHOOK_URL").ok();

        if bot_mode == BotMode::Webhook && webhook_url.is_none() {
            panic!("WEBHOOK_URL must be set when BOT_MODE is webhook");
        }

        let webhook_port = env::var("WEBHOOK_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let webhook_secret = env::var("WEBHOOK_SECRET").ok().filter(|s| !s.is_empty());

        let owner_ids = env::var("OWNER_IDS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| s.trim().parse::<u64>().ok())
            .collect();

        Self {
            bot_token: env::var("BOT_TOKEN").expect("BOT_TOKEN must be set"),
            bot_mode,
            webhook_url,
            webhook_port,
            webhook_secret,
            owner_ids,
            log_chat_id: parse_chat_id(env::var("LOG_CHAT_ID").ok()),
            global_log_chat_id: parse_chat_id(env::var("GLOBAL_LOG_CHAT_ID").ok()),
            mongodb_uri: env::var("MONGODB_URI").expect("MONGODB_URI must be set"),
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "vigil".to_string()),
        }
    }
}

/// Parse an optional chat id; zero or unparseable disables the channel.
fn parse_chat_id(raw: Option<String>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&id| id != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_id_zero_disables() {
        assert_eq!(parse_chat_id(Some("0".to_string())), None);
        assert_eq!(parse_chat_id(Some("-1001234".to_string())), Some(-1001234));
        assert_eq!(parse_chat_id(Some("garbage".to_string())), None);
        assert_eq!(parse_chat_id(None), None);
    }
}
