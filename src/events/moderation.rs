//! Per-message moderation pipeline.
//!
//! Order matters: the ban check is the fast path and short-circuits, the
//! pattern check may warm its cache, and only clean messages forwarded
//! from a chat admin produce moderation buttons.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageOrigin};
use tracing::debug;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::database::models::ModerationContext;
use crate::utils::{extract_message_text, truncate_chars};

/// Display limit for pattern-hit excerpts in log lines.
const LOG_EXCERPT_LIMIT: usize = 140;

pub async fn moderate_message(
    bot: &ThrottledBot,
    msg: &Message,
    state: &AppState,
) -> anyhow::Result<()> {
    let Some(sender) = msg.from.as_ref() else {
        return Ok(());
    };

    let chat_id = msg.chat.id;
    let user_id = sender.id.0;

    // 1) Banned sender: delete immediately
    if state.bans.is_globally_banned(user_id)
        || state.bans.is_locally_banned(chat_id.0, user_id)
    {
        bot.delete_message(chat_id, msg.id).await?;
        state
            .notifier
            .log(&format!(
                "🧹 Auto-delete: user {} (banned) in chat {}",
                user_id, chat_id
            ))
            .await;
        return Ok(());
    }

    // 2) Forbidden patterns (covers captions too)
    let text = extract_message_text(msg);
    if !text.is_empty() && state.patterns.matches(&text).await? {
        bot.delete_message(chat_id, msg.id).await?;
        state
            .notifier
            .log(&format!(
                "🧹 Deleted by pattern in chat {} from {}: {}",
                chat_id,
                user_id,
                truncate_chars(&text, LOG_EXCERPT_LIMIT)
            ))
            .await;
        return Ok(());
    }

    // 3) Forwarded on behalf of a chat admin: offer moderation buttons
    if let Some(MessageOrigin::User { sender_user, .. }) = msg.forward_origin() {
        if state.permissions.is_admin(chat_id, sender_user.id).await? {
            offer_moderation_buttons(bot, msg, state, user_id, &text, sender_user.id.0).await?;
        }
    }

    Ok(())
}

/// Store a moderation context and post the ban/delete button prompt.
async fn offer_moderation_buttons(
    bot: &ThrottledBot,
    msg: &Message,
    state: &AppState,
    offender_user_id: u64,
    text: &str,
    forward_admin_id: u64,
) -> anyhow::Result<()> {
    let ctx = ModerationContext {
        chat_id: msg.chat.id.0,
        offender_user_id,
        message_id: msg.id.0,
        original_text: text.to_string(),
        forward_admin_id,
    };

    let ctx_id = state.contexts.store(&ctx)?;
    debug!("Stored moderation context {} for chat {}", ctx_id, msg.chat.id);

    let keyboard = InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("🚫 Ban", format!("banctx:{}", ctx_id)),
        InlineKeyboardButton::callback("❌ Delete", format!("delctx:{}", ctx_id)),
    ]]);

    bot.send_message(msg.chat.id, "What should be done with this user?")
        .reply_markup(keyboard)
        .await?;

    Ok(())
}
