//! `/random`: force-send one sampled memory.

use teloxide::prelude::*;

use crate::database::connection::DatabaseManager;
use crate::services::memory;

/// Sample size for on-demand replay.
const ON_DEMAND_SAMPLE_LIMIT: i64 = 20;

pub async fn handle_random(bot: Bot, msg: Message, db: &DatabaseManager) -> ResponseResult<()> {
    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        bot.send_message(msg.chat.id, "This command only works in group chats.")
            .await?;
        return Ok(());
    }

    match memory::send_one_random(&bot, db, msg.chat.id, ON_DEMAND_SAMPLE_LIMIT).await {
        Ok(true) => {}
        Ok(false) => {
            bot.send_message(
                msg.chat.id,
                "💭 No messages stored yet. Chat more to build memory.",
            )
            .await?;
        }
        Err(e) => {
            tracing::error!("Random memory failed for chat {}: {}", msg.chat.id.0, e);
            bot.send_message(msg.chat.id, "Couldn't fetch a memory right now.")
                .await?;
        }
    }

    Ok(())
}
