//! `/debug`: archive statistics for the chat.

use teloxide::prelude::*;

use crate::database::{connection::DatabaseManager, models::ArchivedMessage};

pub async fn handle_debug(bot: Bot, msg: Message, db: &DatabaseManager) -> ResponseResult<()> {
    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        bot.send_message(msg.chat.id, "This command only works in group chats.")
            .await?;
        return Ok(());
    }

    let chat_id = msg.chat.id.0;

    let count = match ArchivedMessage::count(&db.pool, chat_id).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to count messages for chat {}: {}", chat_id, e);
            bot.send_message(msg.chat.id, "Failed to read the archive.")
                .await?;
            return Ok(());
        }
    };

    let recent = match ArchivedMessage::recent(&db.pool, chat_id, 5).await {
        Ok(recent) => recent,
        Err(e) => {
            tracing::error!("Failed to load recent messages for chat {}: {}", chat_id, e);
            Vec::new()
        }
    };

    let mut info = format!("🔍 Debug Info for Chat {chat_id}:\n\nTotal messages stored: {count}\n\n");

    if recent.is_empty() {
        info.push_str("No messages found in database.\n");
    } else {
        info.push_str("Recent messages:\n");
        for record in &recent {
            let when = chrono::DateTime::parse_from_rfc3339(&record.captured_at)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| record.captured_at.clone());
            info.push_str(&format!(
                "- {} ({}) at {}\n",
                record.username,
                record.kind.as_str(),
                when
            ));
        }
    }

    bot.send_message(msg.chat.id, info).await?;

    Ok(())
}
