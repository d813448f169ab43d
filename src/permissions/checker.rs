//! Admin checker with caching.
//!
//! The moderation pipeline asks "is this forward origin an admin of this
//! chat?" for every forwarded message, so the getChatMember answer is
//! cached for a few minutes.

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{ChatId, ChatMemberKind, UserId};
use tracing::debug;

use crate::cache::{CacheConfig, CacheRegistry, TypedCache};

/// Cache key: (chat_id, user_id).
type AdminCacheKey = (i64, u64);

/// Cached admin-status checker.
#[derive(Clone)]
pub struct Permissions {
    bot: Bot,
    cache: TypedCache<AdminCacheKey, bool>,
}

impl Permissions {
    pub fn new(bot: Bot, cache_registry: &CacheRegistry) -> Self {
        let cache = cache_registry.get_or_create(
            "admin_status",
            CacheConfig::with_capacity(10_000)
                .ttl(Duration::from_secs(300))
                .tti(Duration::from_secs(120)),
        );

        Self { bot, cache }
    }

    /// Check whether a user is an administrator or the owner of a chat.
    ///
    /// # Errors
    /// Returns error when the Telegram API call fails; a definitive
    /// "not a member" answer is `Ok(false)`, not an error.
    pub async fn is_admin(&self, chat_id: ChatId, user_id: UserId) -> anyhow::Result<bool> {
        let cache_key = (chat_id.0, user_id.0);

        if let Some(cached) = self.cache.get(&cache_key) {
            debug!("Admin cache hit for user {} in chat {}", user_id, chat_id);
            return Ok(cached);
        }

        let member = self.bot.get_chat_member(chat_id, user_id).await?;
        let is_admin = matches!(
            member.kind,
            ChatMemberKind::Owner(_) | ChatMemberKind::Administrator(_)
        );

        self.cache.insert(cache_key, is_admin);
        Ok(is_admin)
    }
}
