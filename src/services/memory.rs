//! Random memory replay: per-chat loops and the send dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::seq::IndexedRandom;
use rand::Rng;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::database::{
    connection::DatabaseManager,
    models::{ArchivedMessage, ContentKind},
};
use crate::utils::logging::log_job_event;

/// Shortest pause between two replayed memories: 30 minutes.
const MIN_REPLAY_DELAY_SECS: u64 = 1800;
/// Longest pause between two replayed memories: 3 hours.
const MAX_REPLAY_DELAY_SECS: u64 = 10800;
/// Sample size for the periodic replay job.
const REPLAY_SAMPLE_LIMIT: i64 = 50;

/// Runs one replay loop per activated chat.
///
/// Each loop sleeps a fresh uniform random delay, sends one sampled memory,
/// and repeats. Activating a chat again aborts and replaces its previous
/// loop, so there is never more than one schedule per chat.
pub struct MemoryScheduler {
    bot: Bot,
    db: DatabaseManager,
    tasks: Mutex<HashMap<i64, JoinHandle<()>>>,
}

impl MemoryScheduler {
    /// Creates the scheduler. No loops run until a chat is activated.
    pub fn new(bot: Bot, db: DatabaseManager) -> Arc<Self> {
        Arc::new(Self {
            bot,
            db,
            tasks: Mutex::new(HashMap::new()),
        })
    }

    /// Starts (or restarts) the replay loop for a chat.
    pub async fn activate(self: &Arc<Self>, chat_id: ChatId) {
        let mut tasks = self.tasks.lock().await;

        if let Some(previous) = tasks.remove(&chat_id.0) {
            previous.abort();
            log_job_event("memory_replay", chat_id.0, "replaced previous schedule");
        }

        let scheduler = Arc::clone(self);
        let handle = tokio::spawn(async move {
            scheduler.replay_loop(chat_id).await;
        });
        tasks.insert(chat_id.0, handle);

        log_job_event("memory_replay", chat_id.0, "activated");
    }

    async fn replay_loop(&self, chat_id: ChatId) {
        loop {
            let delay = rand::rng().random_range(MIN_REPLAY_DELAY_SECS..=MAX_REPLAY_DELAY_SECS);
            tokio::time::sleep(Duration::from_secs(delay)).await;

            // Failures never stop the loop; the next firing gets a new delay.
            match send_one_random(&self.bot, &self.db, chat_id, REPLAY_SAMPLE_LIMIT).await {
                Ok(true) => log_job_event("memory_replay", chat_id.0, "memory sent"),
                Ok(false) => log_job_event("memory_replay", chat_id.0, "no messages archived yet"),
                Err(e) => {
                    tracing::error!("Memory replay failed for chat {}: {}", chat_id.0, e);
                }
            }
        }
    }
}

/// Samples up to `limit` archived messages for the chat, picks one uniformly
/// at random, and sends it. Returns `Ok(false)` when the archive is empty.
pub async fn send_one_random(
    bot: &Bot,
    db: &DatabaseManager,
    chat_id: ChatId,
    limit: i64,
) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    let messages = ArchivedMessage::sample(&db.pool, chat_id.0, limit).await?;

    let picked = {
        let mut rng = rand::rng();
        messages.choose(&mut rng).cloned()
    };

    match picked {
        Some(record) => {
            send_archived_message(bot, chat_id, &record).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Renders and sends one archived message according to its content kind.
pub async fn send_archived_message(
    bot: &Bot,
    chat_id: ChatId,
    record: &ArchivedMessage,
) -> ResponseResult<()> {
    match record.kind {
        ContentKind::Text => {
            let text = record
                .text
                .clone()
                .or_else(|| record.caption.clone())
                .unwrap_or_default();
            bot.send_message(chat_id, format!("Memory from @{}:\n\n{}", record.username, text))
                .await?;
        }
        ContentKind::Voice => {
            if let Some(file_id) = &record.file_id {
                bot.send_voice(chat_id, InputFile::file_id(file_id.clone()))
                    .caption(format!("Voice memory from @{}", record.username))
                    .await?;
            }
        }
        ContentKind::Audio => {
            if let Some(file_id) = &record.file_id {
                bot.send_audio(chat_id, InputFile::file_id(file_id.clone()))
                    .caption(media_caption("Audio memory", record))
                    .await?;
            }
        }
        ContentKind::Photo => {
            if let Some(file_id) = &record.file_id {
                bot.send_photo(chat_id, InputFile::file_id(file_id.clone()))
                    .caption(media_caption("Photo memory", record))
                    .await?;
            }
        }
        ContentKind::Video => {
            if let Some(file_id) = &record.file_id {
                bot.send_video(chat_id, InputFile::file_id(file_id.clone()))
                    .caption(media_caption("Video memory", record))
                    .await?;
            }
        }
        ContentKind::Document => {
            if let Some(file_id) = &record.file_id {
                bot.send_document(chat_id, InputFile::file_id(file_id.clone()))
                    .caption(media_caption("Document memory", record))
                    .await?;
            }
        }
        ContentKind::Sticker => {
            if let Some(file_id) = &record.file_id {
                bot.send_sticker(chat_id, InputFile::file_id(file_id.clone()))
                    .await?;
            }
        }
        ContentKind::VideoNote => {
            if let Some(file_id) = &record.file_id {
                bot.send_video_note(chat_id, InputFile::file_id(file_id.clone()))
                    .await?;
            }
        }
        ContentKind::Animation => {
            if let Some(file_id) = &record.file_id {
                bot.send_animation(chat_id, InputFile::file_id(file_id.clone()))
                    .caption(media_caption("GIF memory", record))
                    .await?;
            }
        }
    }

    Ok(())
}

fn media_caption(label: &str, record: &ArchivedMessage) -> String {
    let mut caption = format!("{} from @{}", label, record.username);
    if let Some(original) = &record.caption {
        caption.push_str("\n\n");
        caption.push_str(original);
    }
    caption
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::ContentKind;

    fn record(kind: ContentKind, caption: Option<&str>) -> ArchivedMessage {
        ArchivedMessage {
            message_id: 1,
            user_id: 1,
            username: "alice".to_string(),
            text: None,
            kind,
            file_id: Some("file".to_string()),
            caption: caption.map(str::to_owned),
            captured_at: "2024-01-01T00:00:00+00:00".to_string(),
            chat_id: 100,
        }
    }

    #[test]
    fn media_caption_includes_original_caption() {
        let with = record(ContentKind::Photo, Some("holiday"));
        assert_eq!(
            media_caption("Photo memory", &with),
            "Photo memory from @alice\n\nholiday"
        );

        let without = record(ContentKind::Photo, None);
        assert_eq!(media_caption("Photo memory", &without), "Photo memory from @alice");
    }
}
