//! Cache configuration.

use std::time::Duration;

/// Configuration for a single cache instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries before LRU eviction kicks in.
    pub max_capacity: u64,

    /// Time-to-live for entries. `None` means entries never expire by age.
    pub ttl: Option<Duration>,

    /// Time-to-idle: entries are evicted if not accessed within this window.
    pub tti: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Some(Duration::from_secs(300)),
            tti: None,
        }
    }
}

impl CacheConfig {
    /// Create a config with the given max capacity and default expiry.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            ..Default::default()
        }
    }

    /// Set time-to-live for cache entries.
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = Some(duration);
        self
    }

    /// Set time-to-idle for cache entries.
    #[must_use]
    pub fn tti(mut self, duration: Duration) -> Self {
        self.tti = Some(duration);
        self
    }

    /// Config for moderation contexts: one day TTL, generous capacity.
    ///
    /// A context must stay resolvable for the whole window in which an admin
    /// may still press a button on a day-old report.
    pub fn moderation_context() -> Self {
        Self {
            max_capacity: 100_000,
            ttl: Some(Duration::from_secs(86_400)),
            tti: None,
        }
    }
}
