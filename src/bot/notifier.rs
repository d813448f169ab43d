//! Notification gateway.
//!
//! All outbound "tell a human" traffic goes through here: the operational
//! log channel and the global ops channel that receives local-ban reports
//! with the escalation button.

use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};
use tracing::warn;

use super::dispatcher::ThrottledBot;
use crate::config::Config;
use crate::utils::{html_escape, truncate_chars};

/// Display limit for quoted original text in ban reports.
const REPORT_TEXT_LIMIT: usize = 1000;

/// Sends operational notifications to the configured Telegram channels.
#[derive(Clone)]
pub struct Notifier {
    bot: ThrottledBot,
    log_chat_id: Option<i64>,
    global_log_chat_id: Option<i64>,
}

impl Notifier {
    pub fn new(bot: ThrottledBot, config: &Config) -> Self {
        Self {
            bot,
            log_chat_id: config.log_chat_id,
            global_log_chat_id: config.global_log_chat_id,
        }
    }

    /// Send a line to the log channel. Best-effort: a failed send is
    /// recorded in the process log and otherwise ignored.
    pub async fn log(&self, message: &str) {
        let Some(chat_id) = self.log_chat_id else {
            return;
        };

        let text = format!("📋 <b>LOG</b>: {}", html_escape(message));
        if let Err(e) = self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html)
            .await
        {
            warn!("Failed to send log notification: {}", e);
        }
    }

    /// Report a local ban to the global ops channel, quoting the offending
    /// text when available and offering escalation to a global ban.
    ///
    /// # Errors
    /// Propagates Telegram API errors; the caller decides whether the ban
    /// itself survives a failed report (it does).
    pub async fn report_local_ban(
        &self,
        chat_id: i64,
        user_id: u64,
        admin_id: u64,
        original_text: Option<&str>,
    ) -> anyhow::Result<()> {
        let Some(ops_chat) = self.global_log_chat_id else {
            return Ok(());
        };

        // Chat title is cosmetic; fall back to the raw id
        let chat_title = match self.bot.get_chat(ChatId(chat_id)).await {
            Ok(chat) => chat.title().map(|t| t.to_string()),
            Err(_) => None,
        }
        .unwrap_or_else(|| chat_id.to_string());

        let mut msg = format!(
            "👮 <b>Local ban</b>\n\
             Chat: <b>{}</b> (<code>{}</code>)\n\
             Admin: <code>{}</code>\n\
             User: <code>{}</code>\n",
            html_escape(&chat_title),
            chat_id,
            admin_id,
            user_id
        );

        if let Some(text) = original_text.filter(|t| !t.is_empty()) {
            msg.push_str(&format!(
                "\nOriginal message:\n<blockquote>{}</blockquote>\n",
                html_escape(&truncate_chars(text, REPORT_TEXT_LIMIT))
            ));
        }

        let keyboard = InlineKeyboardMarkup::new(vec![vec![
            InlineKeyboardButton::callback(
                "🌐 Add to global blacklist",
                format!("globalban:{}", user_id),
            ),
        ]]);

        self.bot
            .send_message(ChatId(ops_chat), msg)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await?;

        Ok(())
    }
}
