//! Inline menu button callbacks.

use teloxide::prelude::*;

use crate::database::{
    connection::DatabaseManager,
    models::{ArchivedMessage, BirthdayEntry},
};
use crate::services::memory;

/// Sample size when a memory is requested from the menu.
const MENU_SAMPLE_LIMIT: i64 = 10;

pub async fn callback_handler(bot: Bot, q: CallbackQuery, db: DatabaseManager) -> ResponseResult<()> {
    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };
    let Some(message) = q.message.clone() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    let chat_id = message.chat.id;

    tracing::info!(
        "Callback received: '{}' from user {} in chat {}",
        data,
        q.from.id.0,
        chat_id.0
    );

    bot.answer_callback_query(q.id).await?;

    match data.as_str() {
        "set_birthday" => {
            bot.edit_message_text(
                chat_id,
                message.id,
                "🎂 To set your birthday, use: /birthday MM-DD\nExample: /birthday 03-15\n\nAfter setting your birthday, send a baby photo for celebrations.",
            )
            .await?;
        }
        "view_birthdays" => {
            let birthdays = match BirthdayEntry::list_for_chat(&db.pool, chat_id.0).await {
                Ok(birthdays) => birthdays,
                Err(e) => {
                    tracing::error!("Failed to list birthdays for chat {}: {}", chat_id.0, e);
                    Vec::new()
                }
            };

            if birthdays.is_empty() {
                bot.edit_message_text(
                    chat_id,
                    message.id,
                    "📅 No birthdays registered in this group yet.",
                )
                .await?;
            } else {
                let mut text = String::from("🎉 Birthdays in this group:\n\n");
                for entry in &birthdays {
                    text.push_str(&format!("🎂 @{}: {}\n", entry.username, entry.date));
                }
                bot.edit_message_text(chat_id, message.id, text).await?;
            }
        }
        "send_random" => match memory::send_one_random(&bot, &db, chat_id, MENU_SAMPLE_LIMIT).await
        {
            Ok(true) => {
                bot.edit_message_text(chat_id, message.id, "🎲 Random message sent!")
                    .await?;
            }
            Ok(false) => {
                bot.edit_message_text(
                    chat_id,
                    message.id,
                    "💭 No messages stored yet. Chat more to build memory.",
                )
                .await?;
            }
            Err(e) => {
                tracing::error!("Random memory failed for chat {}: {}", chat_id.0, e);
                bot.edit_message_text(chat_id, message.id, "Couldn't fetch a memory right now.")
                    .await?;
            }
        },
        "info" => {
            let message_count = ArchivedMessage::count(&db.pool, chat_id.0)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("Failed to count messages for chat {}: {}", chat_id.0, e);
                    0
                });
            let birthday_count = BirthdayEntry::list_for_chat(&db.pool, chat_id.0)
                .await
                .map(|entries| entries.len())
                .unwrap_or_else(|e| {
                    tracing::error!("Failed to list birthdays for chat {}: {}", chat_id.0, e);
                    0
                });

            let info = format!(
                "🤖 Group Memory Bot Status:\n\n💬 Messages stored: {message_count}\n🎂 Birthdays registered: {birthday_count}\n\nThe bot randomly sends old messages and celebrates birthdays at 9 AM."
            );
            bot.edit_message_text(chat_id, message.id, info).await?;
        }
        _ => {
            tracing::warn!("Unknown callback data: {}", data);
        }
    }

    Ok(())
}
