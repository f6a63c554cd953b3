//! Command dispatch.

use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::Command;
use crate::database::connection::DatabaseManager;
use crate::services::memory::MemoryScheduler;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    db: DatabaseManager,
    scheduler: Arc<MemoryScheduler>,
) -> ResponseResult<()> {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::Start => {
            crate::bot::commands::menu::handle_start(bot, msg, &scheduler).await?;
        }
        Command::Menu => {
            crate::bot::commands::menu::handle_menu(bot, msg).await?;
        }
        Command::Birthday { date } => {
            crate::bot::commands::birthday::handle_birthday(bot, msg, date, &db).await?;
        }
        Command::Random => {
            crate::bot::commands::random::handle_random(bot, msg, &db).await?;
        }
        Command::Debug => {
            crate::bot::commands::debug::handle_debug(bot, msg, &db).await?;
        }
    }
    Ok(())
}
