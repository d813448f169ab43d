//! Moderation context store.
//!
//! Short-lived handoff records between a flagged message and the button
//! press that acts on it. Contexts live in a 24h-TTL cache as JSON blobs
//! under opaque random ids; an id that was deleted or expired never
//! resolves again.

use anyhow::Result;
use rand::Rng;
use tracing::warn;

use crate::cache::{CacheConfig, CacheRegistry, TypedCache};
use crate::database::models::ModerationContext;

/// Repository for moderation contexts.
pub struct ModerationContextRepository {
    cache: TypedCache<String, String>,
}

impl ModerationContextRepository {
    pub fn new(cache: &CacheRegistry) -> Self {
        Self {
            cache: cache.get_or_create("moderation_context", CacheConfig::moderation_context()),
        }
    }

    /// Store a context and return its fresh opaque id.
    ///
    /// The id carries 8 bytes of entropy (16 hex chars); collisions are
    /// negligible at the expected volume.
    pub fn store(&self, ctx: &ModerationContext) -> Result<String> {
        let id = format!("{:016x}", rand::thread_rng().gen::<u64>());
        let blob = serde_json::to_string(ctx)?;
        self.cache.insert(id.clone(), blob);
        Ok(id)
    }

    /// Resolve a context id.
    ///
    /// Returns `None` for unknown, expired or undecodable entries; a miss
    /// means "stale, already handled, or expired", never an error.
    pub fn get(&self, id: &str) -> Option<ModerationContext> {
        let blob = self.cache.get(&id.to_string())?;
        match serde_json::from_str(&blob) {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                warn!("Discarding undecodable moderation context {}: {}", id, e);
                None
            }
        }
    }

    /// Remove a context. Removing an unknown id is a no-op.
    pub fn delete(&self, id: &str) {
        self.cache.invalidate(&id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ModerationContext {
        ModerationContext {
            chat_id: 100,
            offender_user_id: 5,
            message_id: 42,
            original_text: "hi".to_string(),
            forward_admin_id: 9,
        }
    }

    fn repo() -> ModerationContextRepository {
        ModerationContextRepository::new(&CacheRegistry::new())
    }

    #[test]
    fn test_store_then_get_roundtrip() {
        let repo = repo();
        let ctx = sample();

        let id = repo.store(&ctx).unwrap();
        assert_eq!(id.len(), 16);
        assert_eq!(repo.get(&id), Some(ctx));
    }

    #[test]
    fn test_delete_is_terminal() {
        let repo = repo();
        let id = repo.store(&sample()).unwrap();

        repo.delete(&id);
        assert_eq!(repo.get(&id), None);

        // deleting again is not an error
        repo.delete(&id);
        assert_eq!(repo.get(&id), None);
    }

    #[test]
    fn test_unknown_id_is_none() {
        let repo = repo();
        assert_eq!(repo.get("abc123"), None);
    }

    #[test]
    fn test_malformed_blob_reads_as_absent() {
        let repo = repo();
        repo.cache.insert("bad".to_string(), "{not json".to_string());
        assert_eq!(repo.get("bad"), None);
    }

    #[test]
    fn test_ids_are_distinct() {
        let repo = repo();
        let a = repo.store(&sample()).unwrap();
        let b = repo.store(&sample()).unwrap();
        assert_ne!(a, b);
    }
}
