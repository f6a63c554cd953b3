//! Archived chat messages and their content classification.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teloxide::types::Message;

/// Classification of an archived message's payload.
///
/// Constructed exactly once at ingestion (see [`ArchivedMessage::from_message`])
/// and consumed by a single exhaustive dispatch when the memory is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Plain text message.
    Text,
    /// Voice note.
    Voice,
    /// Audio file.
    Audio,
    /// Photo (largest size is archived).
    Photo,
    /// Video file.
    Video,
    /// Generic document attachment.
    Document,
    /// Sticker.
    Sticker,
    /// Round video note.
    VideoNote,
    /// GIF / animation.
    Animation,
}

impl ContentKind {
    /// Stable tag used in storage and debug output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Voice => "voice",
            ContentKind::Audio => "audio",
            ContentKind::Photo => "photo",
            ContentKind::Video => "video",
            ContentKind::Document => "document",
            ContentKind::Sticker => "sticker",
            ContentKind::VideoNote => "video_note",
            ContentKind::Animation => "animation",
        }
    }
}

/// A stored copy of a group chat message, kept for later random replay.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ArchivedMessage {
    /// Telegram message id, unique together with `chat_id`.
    pub message_id: i64,
    /// Sender's Telegram user id.
    pub user_id: i64,
    /// Sender's username, falling back to their first name.
    pub username: String,
    /// Message text, if any.
    pub text: Option<String>,
    /// Payload classification.
    pub kind: ContentKind,
    /// Opaque Telegram file id for the attachment, if any.
    pub file_id: Option<String>,
    /// Media caption, if any.
    pub caption: Option<String>,
    /// RFC 3339 timestamp of the original message.
    pub captured_at: String,
    /// Chat the message was posted in.
    pub chat_id: i64,
}

impl ArchivedMessage {
    /// Builds an archive record from an inbound Telegram message.
    ///
    /// Classifies the payload by the first matching media field (voice, audio,
    /// photo, video, document, sticker, video note, animation), defaulting to
    /// text. Returns `None` for bot senders and for messages that carry
    /// neither text, nor an attachment, nor a caption.
    pub fn from_message(msg: &Message) -> Option<Self> {
        let user = msg.from()?;
        if user.is_bot {
            return None;
        }

        let (kind, file_id) = if let Some(voice) = msg.voice() {
            (ContentKind::Voice, Some(voice.file.id.clone()))
        } else if let Some(audio) = msg.audio() {
            (ContentKind::Audio, Some(audio.file.id.clone()))
        } else if let Some(photos) = msg.photo() {
            (ContentKind::Photo, photos.last().map(|p| p.file.id.clone()))
        } else if let Some(video) = msg.video() {
            (ContentKind::Video, Some(video.file.id.clone()))
        } else if let Some(document) = msg.document() {
            (ContentKind::Document, Some(document.file.id.clone()))
        } else if let Some(sticker) = msg.sticker() {
            (ContentKind::Sticker, Some(sticker.file.id.clone()))
        } else if let Some(note) = msg.video_note() {
            (ContentKind::VideoNote, Some(note.file.id.clone()))
        } else if let Some(animation) = msg.animation() {
            (ContentKind::Animation, Some(animation.file.id.clone()))
        } else {
            (ContentKind::Text, None)
        };

        let text = msg.text().map(str::to_owned);
        let caption = msg.caption().map(str::to_owned);

        // Empty records are never archived.
        if text.is_none() && file_id.is_none() && caption.is_none() {
            return None;
        }

        Some(Self {
            message_id: i64::from(msg.id.0),
            user_id: user.id.0 as i64,
            username: user
                .username
                .clone()
                .unwrap_or_else(|| user.first_name.clone()),
            text,
            kind,
            file_id,
            caption,
            captured_at: msg.date.to_rfc3339(),
            chat_id: msg.chat.id.0,
        })
    }

    /// Inserts the record, replacing any previous one with the same
    /// (message_id, chat_id) pair.
    pub async fn store(pool: &sqlx::SqlitePool, msg: &Self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO messages
            (message_id, user_id, username, text, kind, file_id, caption, captured_at, chat_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(msg.message_id)
        .bind(msg.user_id)
        .bind(&msg.username)
        .bind(&msg.text)
        .bind(msg.kind)
        .bind(&msg.file_id)
        .bind(&msg.caption)
        .bind(&msg.captured_at)
        .bind(msg.chat_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Returns up to `limit` records for the chat, chosen uniformly at random
    /// from those that carry text or an attachment. An empty result is a
    /// valid outcome, not an error.
    pub async fn sample(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ArchivedMessage>(
            r#"
            SELECT message_id, user_id, username, text, kind, file_id, caption, captured_at, chat_id
            FROM messages
            WHERE chat_id = ? AND (text IS NOT NULL OR file_id IS NOT NULL)
            ORDER BY RANDOM()
            LIMIT ?
            "#,
        )
        .bind(chat_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Total number of archived messages for the chat.
    pub async fn count(pool: &sqlx::SqlitePool, chat_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_one(pool)
            .await
    }

    /// The newest `limit` records for the chat, most recent first.
    pub async fn recent(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ArchivedMessage>(
            r#"
            SELECT message_id, user_id, username, text, kind, file_id, caption, captured_at, chat_id
            FROM messages
            WHERE chat_id = ?
            ORDER BY captured_at DESC
            LIMIT ?
            "#,
        )
        .bind(chat_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
