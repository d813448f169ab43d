//! Forbidden-content pattern.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A substring checked case-insensitively against every message.
///
/// Order matters only for reproducible cache rebuilds: patterns are read
/// back sorted by `_id`, which preserves insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    /// MongoDB document ID (also the insertion-order key)
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// The substring to match.
    pub text: String,
}

impl Pattern {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }
}
