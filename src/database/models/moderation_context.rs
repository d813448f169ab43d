//! Moderation context.
//!
//! A short-lived handoff record created when a message forwarded from a chat
//! admin is flagged, and consumed when the admin later presses an inline
//! button on it. Lives only in the cache layer (24h TTL), never in MongoDB.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationContext {
    /// Chat where the flagged message was posted.
    pub chat_id: i64,

    /// User whose message is under review.
    pub offender_user_id: u64,

    /// The flagged message.
    pub message_id: i32,

    /// Text or caption of the flagged message.
    pub original_text: String,

    /// Admin identified as the forward origin.
    pub forward_admin_id: u64,
}
