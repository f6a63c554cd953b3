//! Catch-all handler that archives group messages.

use teloxide::prelude::*;

use crate::bot::commands::birthday::BIRTHDAY_USAGE;
use crate::database::{
    connection::DatabaseManager,
    models::{ArchivedMessage, BirthdayEntry, ContentKind},
};

/// Archives an inbound group message.
///
/// Runs after the command branch, so anything that still looks like a
/// command here either failed to parse or is addressed to another bot;
/// those are never archived. Archiving failures are logged and never
/// surface to the chat.
pub async fn archive_handler(bot: Bot, msg: Message, db: DatabaseManager) -> ResponseResult<()> {
    // Memories are only collected from multi-user chats.
    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        return Ok(());
    }

    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            // "/birthday" without a date fails command parsing and lands
            // here; answer with usage instead of silently dropping it.
            if is_birthday_command(text) {
                bot.send_message(msg.chat.id, BIRTHDAY_USAGE).await?;
            }
            return Ok(());
        }
    }

    let Some(record) = ArchivedMessage::from_message(&msg) else {
        return Ok(());
    };

    // A photo doubles as the sender's celebratory photo when they have a
    // birthday registered in this chat and no photo stored yet.
    if record.kind == ContentKind::Photo {
        if let Some(file_id) = &record.file_id {
            match attach_birthday_photo_if_pending(&db, record.user_id, record.chat_id, file_id)
                .await
            {
                Ok(true) => {
                    bot.send_message(msg.chat.id, "📸 Baby photo saved for birthday celebrations!")
                        .await?;
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(
                        "Failed to store birthday photo for user {} in chat {}: {}",
                        record.user_id,
                        record.chat_id,
                        e
                    );
                }
            }
        }
    }

    // The photo is archived as a regular message regardless.
    if let Err(e) = ArchivedMessage::store(&db.pool, &record).await {
        tracing::error!(
            "Failed to archive message {} in chat {}: {}",
            record.message_id,
            record.chat_id,
            e
        );
    }

    Ok(())
}

/// Stores `file_id` as the sender's celebratory photo if they have a
/// birthday entry in this chat with no photo yet. Returns whether the photo
/// was attached; an already-set photo is never overwritten.
pub async fn attach_birthday_photo_if_pending(
    db: &DatabaseManager,
    user_id: i64,
    chat_id: i64,
    file_id: &str,
) -> Result<bool, sqlx::Error> {
    match BirthdayEntry::find(&db.pool, user_id, chat_id).await? {
        Some(entry) if entry.photo_file_id.is_none() => {
            BirthdayEntry::set_photo(&db.pool, user_id, chat_id, file_id).await?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// True only for the exact `/birthday` command token, with or without a
/// `@botname` suffix or arguments. `/birthdays` and the like don't count.
fn is_birthday_command(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .and_then(|token| token.split('@').next())
        .map_or(false, |command| command == "/birthday")
}
