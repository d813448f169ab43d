//! Data models.

mod ban;
mod moderation_context;
mod pattern;

pub use ban::{BanRecord, GlobalBanRecord};
pub use moderation_context::ModerationContext;
pub use pattern::Pattern;
