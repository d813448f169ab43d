//! Ban registry: local and global ban lists with a fast membership cache.
//!
//! MongoDB is the source of truth; the in-memory sets are a rebuildable
//! mirror. Membership checks never hit the database - an empty set means
//! "no bans", not "uncached", so the cache must be warmed at startup and
//! after any external edit via [`BanRepository::reload_cache`].

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use futures::StreamExt;
use mongodb::bson::doc;
use mongodb::options::UpdateOptions;
use mongodb::Collection;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::database::models::{BanRecord, GlobalBanRecord};
use crate::database::Database;

/// In-memory mirror of the ban tables.
///
/// Replaced wholesale on reload, so concurrent readers observe either the
/// previous snapshot or the new one, never a half-populated state.
#[derive(Debug, Default)]
struct BanCache {
    local: HashMap<i64, HashSet<u64>>,
    global: HashSet<u64>,
}

impl BanCache {
    fn add_local(&mut self, chat_id: i64, user_id: u64) {
        self.local.entry(chat_id).or_default().insert(user_id);
    }

    fn add_global(&mut self, user_id: u64) {
        self.global.insert(user_id);
    }

    fn is_locally_banned(&self, chat_id: i64, user_id: u64) -> bool {
        self.local
            .get(&chat_id)
            .map(|set| set.contains(&user_id))
            .unwrap_or(false)
    }

    fn is_globally_banned(&self, user_id: u64) -> bool {
        self.global.contains(&user_id)
    }
}

/// Repository for local and global bans.
pub struct BanRepository {
    local: Collection<BanRecord>,
    global: Collection<GlobalBanRecord>,
    cache: RwLock<BanCache>,
}

impl BanRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            local: db.collection("local_bans"),
            global: db.collection("global_bans"),
            cache: RwLock::new(BanCache::default()),
        }
    }

    /// Check if a user is banned in a specific chat. Cache-only.
    pub fn is_locally_banned(&self, chat_id: i64, user_id: u64) -> bool {
        self.cache.read().is_locally_banned(chat_id, user_id)
    }

    /// Check if a user is banned everywhere. Cache-only.
    pub fn is_globally_banned(&self, user_id: u64) -> bool {
        self.cache.read().is_globally_banned(user_id)
    }

    /// Ban a user in one chat.
    ///
    /// The durable insert is idempotent: a second ban of the same
    /// (chat, user) pair leaves exactly one record. The cached set is
    /// updated after the store confirms the write.
    ///
    /// # Errors
    /// Propagates the MongoDB error; the cache is left untouched on failure.
    pub async fn ban_user(&self, chat_id: i64, user_id: u64, admin_id: u64) -> Result<()> {
        let record = BanRecord::new(chat_id, user_id, admin_id);
        let filter = doc! { "chat_id": chat_id, "user_id": user_id as i64 };
        let update = doc! {
            "$setOnInsert": {
                "chat_id": record.chat_id,
                "user_id": record.user_id as i64,
                "admin_id": record.admin_id as i64,
                "banned_at": record.banned_at,
            }
        };
        let options = UpdateOptions::builder().upsert(true).build();

        self.local
            .update_one(filter, update)
            .with_options(options)
            .await?;

        self.cache.write().add_local(chat_id, user_id);
        info!("Local ban: user {} in chat {}, admin {}", user_id, chat_id, admin_id);

        Ok(())
    }

    /// Ban a user globally. Idempotent, same discipline as [`Self::ban_user`].
    pub async fn global_ban(&self, user_id: u64) -> Result<()> {
        let record = GlobalBanRecord::new(user_id);
        let filter = doc! { "user_id": user_id as i64 };
        let update = doc! {
            "$setOnInsert": {
                "user_id": record.user_id as i64,
                "banned_at": record.banned_at,
            }
        };
        let options = UpdateOptions::builder().upsert(true).build();

        self.global
            .update_one(filter, update)
            .with_options(options)
            .await?;

        self.cache.write().add_global(user_id);
        info!("Global ban: user {}", user_id);

        Ok(())
    }

    /// Rebuild the membership cache from the database.
    ///
    /// The fresh snapshot is built off-lock and swapped in at the end, so a
    /// concurrent check sees either the old or the new content in full.
    pub async fn reload_cache(&self) -> Result<()> {
        let mut fresh = BanCache::default();

        let mut cursor = self.local.find(doc! {}).await?;
        while let Some(record) = cursor.next().await {
            let record = record?;
            fresh.add_local(record.chat_id, record.user_id);
        }

        let mut cursor = self.global.find(doc! {}).await?;
        while let Some(record) = cursor.next().await {
            let record = record?;
            fresh.add_global(record.user_id);
        }

        let local_chats = fresh.local.len();
        let global_count = fresh.global.len();
        *self.cache.write() = fresh;

        debug!(
            "Ban cache reloaded: {} chats with local bans, {} global bans",
            local_chats, global_count
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_after_insert() {
        let mut cache = BanCache::default();
        cache.add_local(100, 5);

        assert!(cache.is_locally_banned(100, 5));
        assert!(!cache.is_locally_banned(100, 6));
        assert!(!cache.is_locally_banned(101, 5));
        assert!(!cache.is_globally_banned(5));
    }

    #[test]
    fn test_global_membership() {
        let mut cache = BanCache::default();
        cache.add_global(7);

        assert!(cache.is_globally_banned(7));
        assert!(!cache.is_globally_banned(8));
        // a global ban does not imply a local record
        assert!(!cache.is_locally_banned(1, 7));
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut cache = BanCache::default();
        cache.add_local(100, 5);
        cache.add_local(100, 5);

        assert_eq!(cache.local.get(&100).unwrap().len(), 1);
    }

    #[test]
    fn test_rebuilt_snapshot_mirrors_records() {
        // Simulates reload: the snapshot holds exactly the inserted records
        let records = [(100i64, 5u64), (100, 6), (200, 5)];
        let globals = [9u64];

        let mut fresh = BanCache::default();
        for (chat_id, user_id) in records {
            fresh.add_local(chat_id, user_id);
        }
        for user_id in globals {
            fresh.add_global(user_id);
        }

        for (chat_id, user_id) in records {
            assert!(fresh.is_locally_banned(chat_id, user_id));
        }
        assert!(fresh.is_globally_banned(9));
        assert!(!fresh.is_locally_banned(200, 6));
        assert!(!fresh.is_globally_banned(5));
    }
}
