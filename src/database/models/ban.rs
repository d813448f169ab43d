//! Ban records.
//!
//! Both tables are append-only: there is no unban path, records are never
//! updated or deleted.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A ban scoped to a single chat. Unique on (chat_id, user_id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanRecord {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Telegram chat ID.
    pub chat_id: i64,

    /// Banned user ID.
    pub user_id: u64,

    /// Admin who issued the ban.
    pub admin_id: u64,

    /// Unix timestamp of the ban.
    pub banned_at: i64,
}

impl BanRecord {
    pub fn new(chat_id: i64, user_id: u64, admin_id: u64) -> Self {
        Self {
            id: None,
            chat_id,
            user_id,
            admin_id,
            banned_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// A ban effective across every chat the bot moderates. Unique on user_id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalBanRecord {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Banned user ID.
    pub user_id: u64,

    /// Unix timestamp of the ban.
    pub banned_at: i64,
}

impl GlobalBanRecord {
    pub fn new(user_id: u64) -> Self {
        Self {
            id: None,
            user_id,
            banned_at: chrono::Utc::now().timestamp(),
        }
    }
}
