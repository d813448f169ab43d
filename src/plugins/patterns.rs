//! Owner command: /add_pattern.
//!
//! Appends a forbidden pattern to the database. The matcher picks it up on
//! its next cache warm, so no explicit reload is needed.

use teloxide::prelude::*;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::utils::truncate_chars;

pub async fn add_pattern_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    pattern: String,
) -> anyhow::Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    if !state.is_owner(user.id.0) {
        return Ok(());
    }

    let pattern = pattern.trim();
    if pattern.is_empty() {
        bot.send_message(msg.chat.id, "Usage: /add_pattern <text>")
            .await?;
        return Ok(());
    }

    state.patterns.add_pattern(pattern).await?;

    bot.send_message(msg.chat.id, "✅ Pattern added").await?;
    state
        .notifier
        .log(&format!(
            "Owner {} added pattern: {}",
            user.id,
            truncate_chars(pattern, 140)
        ))
        .await;

    Ok(())
}
