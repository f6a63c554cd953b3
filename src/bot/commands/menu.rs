//! `/start` and `/menu`: activation and the inline menu.

use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::services::memory::MemoryScheduler;

/// Builds the inline menu mirroring the text commands.
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("Set Birthday", "set_birthday")],
        vec![InlineKeyboardButton::callback("View Birthdays", "view_birthdays")],
        vec![InlineKeyboardButton::callback(
            "Send Random Message",
            "send_random",
        )],
        vec![InlineKeyboardButton::callback("Info", "info")],
    ])
}

/// Activates the memory replay loop for this chat and shows the menu.
/// Re-running `/start` replaces the chat's previous replay schedule.
pub async fn handle_start(
    bot: Bot,
    msg: Message,
    scheduler: &Arc<MemoryScheduler>,
) -> ResponseResult<()> {
    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        bot.send_message(msg.chat.id, "I only work in group chats.")
            .await?;
        return Ok(());
    }

    scheduler.activate(msg.chat.id).await;

    bot.send_message(
        msg.chat.id,
        "✅ Bot activated! I will randomly send old messages and celebrate birthdays.\n\nChoose an option:",
    )
    .reply_markup(main_menu())
    .await?;

    Ok(())
}

/// Redisplays the inline menu.
pub async fn handle_menu(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, "📋 Menu:")
        .reply_markup(main_menu())
        .await?;

    Ok(())
}
