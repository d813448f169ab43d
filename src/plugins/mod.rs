//! Plugin system for command and callback handlers.

pub mod callbacks;
pub mod patterns;
pub mod reload;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

/// All bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(
        rename = "reload_cache",
        description = "Rebuild ban and pattern caches from the database (owner only)"
    )]
    ReloadCache,

    #[command(
        rename = "add_pattern",
        description = "Add a forbidden pattern (owner only)"
    )]
    AddPattern(String),
}

/// Build the combined command handler.
pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    teloxide::filter_command::<Command, _>()
        .branch(case![Command::ReloadCache].endpoint(reload::reload_cache_command))
        .branch(case![Command::AddPattern(pattern)].endpoint(patterns::add_pattern_command))
}

/// Build the callback query handler.
pub fn callback_handler() -> UpdateHandler<anyhow::Error> {
    Update::filter_callback_query().endpoint(callbacks::callback_entry)
}
