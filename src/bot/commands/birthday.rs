//! `/birthday MM-DD`: birthday registration.

use teloxide::prelude::*;

use crate::database::{connection::DatabaseManager, models::BirthdayEntry};
use crate::utils::logging::{log_command_error, log_command_start};
use crate::utils::validation::validate_birthday_date;

/// Usage hint shown for missing or malformed arguments.
pub const BIRTHDAY_USAGE: &str = "Usage: /birthday MM-DD\nExample: /birthday 03-15";

pub async fn handle_birthday(
    bot: Bot,
    msg: Message,
    date: String,
    db: &DatabaseManager,
) -> ResponseResult<()> {
    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        bot.send_message(msg.chat.id, "This command only works in group chats.")
            .await?;
        return Ok(());
    }

    let Some(user) = msg.from() else {
        return Ok(());
    };
    let chat_id = msg.chat.id.0;
    let user_id = user.id.0 as i64;
    let username = user
        .username
        .clone()
        .unwrap_or_else(|| user.first_name.clone());

    log_command_start("birthday", &username, user_id, chat_id);

    if date.trim().is_empty() {
        bot.send_message(msg.chat.id, BIRTHDAY_USAGE).await?;
        return Ok(());
    }

    // Validation failures never reach the store.
    let normalized = match validate_birthday_date(&date) {
        Ok(normalized) => normalized,
        Err(e) => {
            bot.send_message(msg.chat.id, format!("❌ {e}")).await?;
            return Ok(());
        }
    };

    match BirthdayEntry::upsert(&db.pool, user_id, chat_id, &username, &normalized).await {
        Ok(()) => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "🎂 Birthday set for {normalized}!\nSend a baby photo now to complete setup, or use it later when celebrating your birthday."
                ),
            )
            .await?;
        }
        Err(e) => {
            log_command_error("birthday", &username, user_id, chat_id, &e.to_string());
            bot.send_message(
                msg.chat.id,
                "An error occurred while setting your birthday. Please try again.",
            )
            .await?;
        }
    }

    Ok(())
}
