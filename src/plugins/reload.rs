//! Owner command: /reload_cache.
//!
//! Rebuilds the ban membership sets and the pattern list from MongoDB.
//! Needed after out-of-band edits to the tables; safe to run at any time.

use teloxide::prelude::*;

use crate::bot::dispatcher::{AppState, ThrottledBot};

pub async fn reload_cache_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    // Non-owners get no reaction at all
    if !state.is_owner(user.id.0) {
        return Ok(());
    }

    state.patterns.reload_cache(None).await?;
    state.bans.reload_cache().await?;

    bot.send_message(msg.chat.id, "✅ Cache reloaded from the database")
        .await?;
    state
        .notifier
        .log(&format!("Owner {} ran /reload_cache", user.id))
        .await;

    Ok(())
}
