//! Per-chat birthday records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A member's birthday in one chat, with an optional celebratory photo.
///
/// Keyed by (user_id, chat_id): the same user can register different
/// birthdays in different chats.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BirthdayEntry {
    /// Telegram user id.
    pub user_id: i64,
    /// Chat the birthday is registered in.
    pub chat_id: i64,
    /// Username at registration time.
    pub username: String,
    /// Month and day as a zero-padded "MM-DD" string.
    pub date: String,
    /// File id of the celebratory photo, once supplied.
    pub photo_file_id: Option<String>,
    /// Whether this year's celebration message has already been sent.
    pub notified: bool,
}

impl BirthdayEntry {
    /// Inserts or replaces the entry for (user_id, chat_id).
    ///
    /// Replacement resets any previously stored photo and notified flag;
    /// the caller re-prompts for a photo after a re-registration.
    pub async fn upsert(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        chat_id: i64,
        username: &str,
        date: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT OR REPLACE INTO birthdays (user_id, chat_id, username, date) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(chat_id)
        .bind(username)
        .bind(date)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Stores the celebratory photo. Unconditional: the caller is responsible
    /// for only invoking this while no photo is set yet.
    pub async fn set_photo(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        chat_id: i64,
        file_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE birthdays SET photo_file_id = ? WHERE user_id = ? AND chat_id = ?")
            .bind(file_id)
            .bind(user_id)
            .bind(chat_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Point lookup for one user's entry in one chat.
    pub async fn find(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        chat_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, BirthdayEntry>(
            "SELECT user_id, chat_id, username, date, photo_file_id, notified FROM birthdays WHERE user_id = ? AND chat_id = ?",
        )
        .bind(user_id)
        .bind(chat_id)
        .fetch_optional(pool)
        .await
    }

    /// Not-yet-notified entries matching the exact "MM-DD" date in one chat.
    pub async fn due_for_chat(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        date: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BirthdayEntry>(
            "SELECT user_id, chat_id, username, date, photo_file_id, notified FROM birthdays WHERE chat_id = ? AND date = ? AND notified = FALSE",
        )
        .bind(chat_id)
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// Chats that have at least one not-yet-notified entry on the date.
    /// Drives the daily sweep without an in-memory chat registry.
    pub async fn chats_with_date(
        pool: &sqlx::SqlitePool,
        date: &str,
    ) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT DISTINCT chat_id FROM birthdays WHERE date = ? AND notified = FALSE",
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// Marks one user's entry in one chat as celebrated.
    pub async fn mark_notified(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        chat_id: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE birthdays SET notified = TRUE WHERE user_id = ? AND chat_id = ?")
            .bind(user_id)
            .bind(chat_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Clears the notified flag for every entry with this date string,
    /// across all chats.
    pub async fn reset_notifications(
        pool: &sqlx::SqlitePool,
        date: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE birthdays SET notified = FALSE WHERE date = ?")
            .bind(date)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// All entries for a chat ordered by date ascending. Lexicographic
    /// "MM-DD" ordering coincides with calendar ordering.
    pub async fn list_for_chat(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BirthdayEntry>(
            "SELECT user_id, chat_id, username, date, photo_file_id, notified FROM birthdays WHERE chat_id = ? ORDER BY date",
        )
        .bind(chat_id)
        .fetch_all(pool)
        .await
    }
}
