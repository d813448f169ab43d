//! Vigil - Telegram moderation bot.
//!
//! Receives inbound messages and button presses, checks senders against
//! local/global ban lists and text against forbidden patterns, and
//! deletes/bans as needed.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - MongoDB integration (bans, patterns) and repositories
//! - `cache` - Moka-backed caches (moderation contexts, admin checks)
//! - `permissions` - Admin checking with caching
//! - `bot` - Dispatcher, run modes, notification gateway
//! - `plugins` - Command and callback handlers
//! - `events` - Per-message moderation pipeline
//! - `utils` - Text helpers

mod bot;
mod cache;
mod config;
mod database;
mod events;
mod permissions;
mod plugins;
mod utils;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::dispatcher::AppState;
use cache::CacheRegistry;
use config::Config;
use database::Database;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vigil=info,teloxide=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Vigil bot...");

    let config = Config::from_env();
    info!("Configuration loaded successfully");
    info!("Bot mode: {:?}", config.bot_mode);

    info!("Connecting to MongoDB...");
    let db = Database::connect(&config.mongodb_uri, &config.mongodb_database).await?;
    let db = Arc::new(db);
    info!("Database connected");

    let cache = Arc::new(CacheRegistry::new());
    info!("Cache registry initialized");

    // Throttle respects Telegram's rate limits out of the box
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    if config.owner_ids.is_empty() {
        info!("No owner IDs configured (OWNER_IDS is empty)");
    } else {
        info!("Bot owners: {:?}", config.owner_ids);
    }

    let state = AppState::new(bot.clone(), db, cache, &config);

    // Ban checks assume a pre-warmed cache (an empty set means "no bans"),
    // so rebuild both caches before taking traffic
    state.bans.reload_cache().await?;
    state.patterns.reload_cache(None).await?;
    info!("Ban and pattern caches warmed");

    let dispatcher = bot::build_dispatcher(bot.clone(), state);

    bot::run(&config, dispatcher, bot).await;

    Ok(())
}
