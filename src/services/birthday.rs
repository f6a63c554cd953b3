//! Daily birthday check.

use std::sync::Arc;

use chrono::Local;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::database::{connection::DatabaseManager, models::BirthdayEntry};
use crate::utils::logging::log_job_event;

type ServiceResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Runs the daily birthday sweep at 09:00.
///
/// Affected chats are discovered from the store, so activation state
/// survives restarts and no in-memory chat registry is needed.
pub struct BirthdayService {
    bot: Bot,
    db: Arc<DatabaseManager>,
    scheduler: JobScheduler,
}

impl BirthdayService {
    /// Creates the service without scheduling anything yet.
    pub async fn new(bot: Bot, db: Arc<DatabaseManager>) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self { bot, db, scheduler })
    }

    /// Schedules the daily check and starts the scheduler.
    pub async fn start(&mut self) -> ServiceResult {
        let bot = self.bot.clone();
        let db = self.db.clone();

        let birthday_job = Job::new_async("0 0 9 * * *", move |_uuid, _l| {
            let bot = bot.clone();
            let db = db.clone();
            Box::pin(async move {
                if let Err(e) = celebrate_birthdays(bot, db).await {
                    tracing::error!("Birthday check failed: {}", e);
                }
            })
        })?;

        self.scheduler.add(birthday_job).await?;
        self.scheduler.start().await?;

        tracing::info!("Birthday service started - checking daily at 09:00");
        Ok(())
    }

    /// Shuts down the scheduler.
    pub async fn stop(&mut self) -> ServiceResult {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    // Manual trigger for testing
    pub async fn check_birthdays_now(&self) -> ServiceResult {
        celebrate_birthdays(self.bot.clone(), self.db.clone()).await
    }
}

async fn celebrate_birthdays(bot: Bot, db: Arc<DatabaseManager>) -> ServiceResult {
    let today = Local::now().format("%m-%d").to_string();
    let yesterday = (Local::now() - chrono::Duration::days(1))
        .format("%m-%d")
        .to_string();

    sweep(&bot, &db, &today, &yesterday).await
}

async fn sweep(bot: &Bot, db: &DatabaseManager, today: &str, yesterday: &str) -> ServiceResult {
    for chat_id in due_chats(db, today).await {
        let due = match BirthdayEntry::due_for_chat(&db.pool, chat_id, today).await {
            Ok(due) => due,
            Err(e) => {
                tracing::error!("Failed to load birthdays for chat {}: {}", chat_id, e);
                continue;
            }
        };

        for entry in due {
            // A failed send leaves the entry eligible for the next sweep.
            if let Err(e) = celebrate_one(bot, &entry).await {
                tracing::error!(
                    "Failed to send birthday message for @{} in chat {}: {}",
                    entry.username,
                    chat_id,
                    e
                );
                continue;
            }

            if let Err(e) = BirthdayEntry::mark_notified(&db.pool, entry.user_id, entry.chat_id).await
            {
                tracing::error!(
                    "Failed to mark @{} notified in chat {}: {}",
                    entry.username,
                    chat_id,
                    e
                );
            }

            log_job_event(
                "birthday_check",
                chat_id,
                &format!("celebrated @{}", entry.username),
            );
        }
    }

    // Re-arm yesterday's entries for next year. The sweep is keyed by date
    // string only, across all chats.
    BirthdayEntry::reset_notifications(&db.pool, yesterday).await?;

    Ok(())
}

/// Chats with at least one entry on `date`. A storage error here must not
/// abort the sweep (the reset pass still has to run), so it is logged and
/// treated as "no chats today".
async fn due_chats(db: &DatabaseManager, date: &str) -> Vec<i64> {
    match BirthdayEntry::chats_with_date(&db.pool, date).await {
        Ok(chats) => chats,
        Err(e) => {
            tracing::error!("Failed to find chats with birthdays on {}: {}", date, e);
            Vec::new()
        }
    }
}

async fn celebrate_one(bot: &Bot, entry: &BirthdayEntry) -> ResponseResult<()> {
    let chat_id = ChatId(entry.chat_id);
    let greeting = format!("🎉 Happy Birthday @{}! 🎂", entry.username);

    match &entry.photo_file_id {
        Some(file_id) => {
            bot.send_photo(chat_id, InputFile::file_id(file_id.clone()))
                .caption(greeting)
                .await?;
        }
        None => {
            bot.send_message(chat_id, greeting).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_test_db() -> (DatabaseManager, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = DatabaseManager::new(&format!("sqlite:{}", db_path.display()))
            .await
            .unwrap();
        db.init_schema().await.unwrap();
        (db, temp_dir)
    }

    #[tokio::test]
    async fn test_due_chats_degrades_to_empty_on_storage_error() {
        let (db, _temp_dir) = setup_test_db().await;

        BirthdayEntry::upsert(&db.pool, 1, 100, "alice", "03-15")
            .await
            .unwrap();
        assert_eq!(due_chats(&db, "03-15").await, vec![100]);

        // A broken store must yield "no chats" instead of an error, so the
        // sweep still reaches its reset pass.
        sqlx::query("DROP TABLE birthdays")
            .execute(&db.pool)
            .await
            .unwrap();
        assert!(due_chats(&db, "03-15").await.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_rearms_yesterdays_entries() {
        let (db, _temp_dir) = setup_test_db().await;
        let bot = Bot::new("123:TEST");

        // Celebrated yesterday in two chats; nothing is due today, so the
        // sweep sends nothing and only runs the reset.
        BirthdayEntry::upsert(&db.pool, 1, 100, "alice", "03-15")
            .await
            .unwrap();
        BirthdayEntry::upsert(&db.pool, 1, 200, "alice", "03-15")
            .await
            .unwrap();
        BirthdayEntry::mark_notified(&db.pool, 1, 100).await.unwrap();
        BirthdayEntry::mark_notified(&db.pool, 1, 200).await.unwrap();

        sweep(&bot, &db, "03-16", "03-15").await.unwrap();

        assert_eq!(
            BirthdayEntry::due_for_chat(&db.pool, 100, "03-15")
                .await
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            BirthdayEntry::due_for_chat(&db.pool, 200, "03-15")
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
