//! Callback query handlers.
//!
//! Button payloads use an `action:argument` grammar. The legacy `ban` and
//! `del` actions carry colon-joined integers; the `*ctx` actions carry an
//! opaque moderation-context id minted by the context store.

use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId};
use tracing::error;

use crate::bot::dispatcher::{AppState, ThrottledBot};

/// A decoded button payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Legacy: `ban:user_id:chat_id`.
    Ban { user_id: u64, chat_id: i64 },
    /// Legacy: `del:message_id:chat_id`.
    Del { message_id: i32, chat_id: i64 },
    /// `globalban:user_id`.
    GlobalBan { user_id: u64 },
    /// `banctx:ctx_id`.
    BanCtx(String),
    /// `delctx:ctx_id`.
    DelCtx(String),
}

/// Parse an `action:argument` payload. Malformed data yields `None` and is
/// treated the same as an unknown action downstream.
pub fn parse_callback_data(data: &str) -> Option<CallbackAction> {
    let (action, arg) = data.split_once(':')?;

    match action {
        "ban" => {
            let (user_id, chat_id) = arg.split_once(':')?;
            Some(CallbackAction::Ban {
                user_id: user_id.parse().ok()?,
                chat_id: chat_id.parse().ok()?,
            })
        }
        "del" => {
            let (message_id, chat_id) = arg.split_once(':')?;
            Some(CallbackAction::Del {
                message_id: message_id.parse().ok()?,
                chat_id: chat_id.parse().ok()?,
            })
        }
        "globalban" => Some(CallbackAction::GlobalBan {
            user_id: arg.parse().ok()?,
        }),
        "banctx" if !arg.is_empty() => Some(CallbackAction::BanCtx(arg.to_string())),
        "delctx" if !arg.is_empty() => Some(CallbackAction::DelCtx(arg.to_string())),
        _ => None,
    }
}

/// Per-event error boundary for callback queries.
pub async fn callback_entry(
    bot: ThrottledBot,
    q: CallbackQuery,
    state: AppState,
) -> anyhow::Result<()> {
    if let Err(e) = handle_callback(&bot, &q, &state).await {
        error!("Callback handler error: {:#}", e);
        state.notifier.log(&format!("❗ Error: {}", e)).await;
    }
    Ok(())
}

async fn handle_callback(
    bot: &ThrottledBot,
    q: &CallbackQuery,
    state: &AppState,
) -> anyhow::Result<()> {
    let data = q.data.as_deref().unwrap_or("");
    let presser_id = q.from.id.0;

    let Some(action) = parse_callback_data(data) else {
        ack(bot, q, "Unknown action").await?;
        return Ok(());
    };

    match action {
        CallbackAction::Ban { user_id, chat_id } => {
            ban_and_report(state, chat_id, user_id, presser_id, None).await?;
            ack(bot, q, "User banned").await?;
        }

        CallbackAction::Del { message_id, chat_id } => {
            bot.delete_message(ChatId(chat_id), MessageId(message_id))
                .await?;
            state
                .notifier
                .log(&format!(
                    "🗑️ Deleted message {} via admin button in chat {}",
                    message_id, chat_id
                ))
                .await;
            ack(bot, q, "Message deleted").await?;
        }

        CallbackAction::GlobalBan { user_id } => {
            state.bans.global_ban(user_id).await?;
            state
                .notifier
                .log(&format!(
                    "🌐 Global ban: {}, initiated by {}",
                    user_id, presser_id
                ))
                .await;
            ack(bot, q, "User added to the global blacklist").await?;
        }

        CallbackAction::BanCtx(ctx_id) => {
            let Some(ctx) = state.contexts.get(&ctx_id) else {
                ack(bot, q, "Context not found or expired").await?;
                return Ok(());
            };

            ban_and_report(
                state,
                ctx.chat_id,
                ctx.offender_user_id,
                presser_id,
                Some(&ctx.original_text),
            )
            .await?;
            ack(bot, q, "User banned").await?;

            // single-use context
            state.contexts.delete(&ctx_id);
        }

        CallbackAction::DelCtx(ctx_id) => {
            let Some(ctx) = state.contexts.get(&ctx_id) else {
                ack(bot, q, "Context not found or expired").await?;
                return Ok(());
            };

            bot.delete_message(ChatId(ctx.chat_id), MessageId(ctx.message_id))
                .await?;
            state
                .notifier
                .log(&format!(
                    "🗑️ Deleted message {} (ctx) in chat {} by admin {}",
                    ctx.message_id, ctx.chat_id, presser_id
                ))
                .await;
            ack(bot, q, "Message deleted").await?;

            state.contexts.delete(&ctx_id);
        }
    }

    Ok(())
}

/// Ban a user and report to the ops channel.
///
/// The report failing does not undo the ban; it is logged and dropped.
async fn ban_and_report(
    state: &AppState,
    chat_id: i64,
    user_id: u64,
    admin_id: u64,
    original_text: Option<&str>,
) -> anyhow::Result<()> {
    state.bans.ban_user(chat_id, user_id, admin_id).await?;
    state
        .notifier
        .log(&format!(
            "🚫 Local ban: user {} in chat {}, admin {}",
            user_id, chat_id, admin_id
        ))
        .await;

    if let Err(e) = state
        .notifier
        .report_local_ban(chat_id, user_id, admin_id, original_text)
        .await
    {
        error!("Failed to send ban report: {:#}", e);
    }

    Ok(())
}

/// Answer a callback query with a short text.
async fn ack(bot: &ThrottledBot, q: &CallbackQuery, text: &str) -> anyhow::Result<()> {
    bot.answer_callback_query(&q.id).text(text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_ban() {
        assert_eq!(
            parse_callback_data("ban:5:-100123"),
            Some(CallbackAction::Ban {
                user_id: 5,
                chat_id: -100123
            })
        );
    }

    #[test]
    fn test_parse_legacy_del() {
        assert_eq!(
            parse_callback_data("del:42:-100123"),
            Some(CallbackAction::Del {
                message_id: 42,
                chat_id: -100123
            })
        );
    }

    #[test]
    fn test_parse_globalban() {
        assert_eq!(
            parse_callback_data("globalban:7"),
            Some(CallbackAction::GlobalBan { user_id: 7 })
        );
    }

    #[test]
    fn test_parse_ctx_actions() {
        assert_eq!(
            parse_callback_data("banctx:abc123"),
            Some(CallbackAction::BanCtx("abc123".to_string()))
        );
        assert_eq!(
            parse_callback_data("delctx:abc123"),
            Some(CallbackAction::DelCtx("abc123".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_callback_data(""), None);
        assert_eq!(parse_callback_data("ban"), None);
        assert_eq!(parse_callback_data("ban:not-a-number:1"), None);
        assert_eq!(parse_callback_data("ban:5"), None);
        assert_eq!(parse_callback_data("globalban:xyz"), None);
        assert_eq!(parse_callback_data("banctx:"), None);
        assert_eq!(parse_callback_data("frobnicate:1"), None);
    }
}
