//! Cache module - named, typed in-process caches backed by Moka.
//!
//! The moderation-context store and the admin-permission checker each own a
//! named cache created through the central [`CacheRegistry`]. The ban sets
//! and pattern list do NOT live here: they need atomic full-snapshot
//! replacement and an explicit loaded/unloaded state, which an evicting LRU
//! cache cannot express (see `database::repository`).

mod config;
mod registry;
mod typed;

pub use config::CacheConfig;
pub use registry::CacheRegistry;
pub use typed::TypedCache;
