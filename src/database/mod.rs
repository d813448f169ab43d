//! Database module exports.

pub mod models;
mod mongo;
pub mod repository;

pub use mongo::Database;
pub use repository::{BanRepository, ModerationContextRepository, PatternRepository};
