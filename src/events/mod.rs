//! Event handler system.

pub mod moderation;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::error;

use crate::bot::dispatcher::{AppState, ThrottledBot};

/// Build the per-message moderation handler.
pub fn message_event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message| msg.chat.is_group() || msg.chat.is_supergroup())
        .endpoint(moderation_entry)
}

/// Per-event error boundary.
///
/// A failed pipeline run is logged, reported to the ops channel as a
/// best-effort side note, and the event is dropped. No retries.
async fn moderation_entry(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    if let Err(e) = moderation::moderate_message(&bot, &msg, &state).await {
        error!("Moderation pipeline error: {:#}", e);
        state.notifier.log(&format!("❗ Error: {}", e)).await;
    }
    Ok(())
}
