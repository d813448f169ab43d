//! Repository module - data access layer.

mod ban_repository;
mod moderation_context_repository;
mod pattern_repository;

pub use ban_repository::BanRepository;
pub use moderation_context_repository::ModerationContextRepository;
pub use pattern_repository::PatternRepository;
