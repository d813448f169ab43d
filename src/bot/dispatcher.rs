//! Message dispatcher setup.
//!
//! Builds the dispatcher with the command, moderation and callback handlers.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use super::notifier::Notifier;
use crate::cache::CacheRegistry;
use crate::config::Config;
use crate::database::{
    BanRepository, Database, ModerationContextRepository, PatternRepository,
};
use crate::events;
use crate::permissions::Permissions;
use crate::plugins;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Ban registry (local + global bans, cached membership sets).
    pub bans: Arc<BanRepository>,

    /// Forbidden-pattern matcher with lazy cache warm.
    pub patterns: Arc<PatternRepository>,

    /// Short-lived moderation contexts for button handoff.
    pub contexts: Arc<ModerationContextRepository>,

    /// Cached chat-admin checks.
    pub permissions: Permissions,

    /// Ops-channel notifications.
    pub notifier: Notifier,

    /// Owner user IDs (may run /reload_cache).
    pub owner_ids: Vec<u64>,
}

impl AppState {
    pub fn new(
        bot: ThrottledBot,
        db: Arc<Database>,
        cache: Arc<CacheRegistry>,
        config: &Config,
    ) -> Self {
        // Permissions needs the inner Bot for API calls
        let permissions = Permissions::new(bot.inner().clone(), &cache);
        let notifier = Notifier::new(bot, config);

        Self {
            bans: Arc::new(BanRepository::new(&db)),
            patterns: Arc::new(PatternRepository::new(&db)),
            contexts: Arc::new(ModerationContextRepository::new(&cache)),
            permissions,
            notifier,
            owner_ids: config.owner_ids.clone(),
        }
    }

    /// Check if a user is a bot owner.
    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_ids.contains(&user_id)
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    state: AppState,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    // Commands take priority over the moderation pipeline
    let message_handler = Update::filter_message()
        .branch(plugins::command_handler())
        .branch(events::message_event_handler());

    let callback_handler = plugins::callback_handler();

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}
