//! Update dispatch schema.

pub mod archive;
pub mod callback;
pub mod message;

use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::database::connection::DatabaseManager;
use crate::services::memory::MemoryScheduler;

/// Wires the database and the replay scheduler into the dispatch tree.
pub struct BotHandler {
    /// Shared database handle.
    pub db: DatabaseManager,
    /// Per-chat memory replay scheduler.
    pub scheduler: Arc<MemoryScheduler>,
}

impl BotHandler {
    /// Creates a handler over the shared database and scheduler.
    pub fn new(db: DatabaseManager, scheduler: Arc<MemoryScheduler>) -> Self {
        Self { db, scheduler }
    }

    /// Builds the dispatch schema: commands first, then button callbacks,
    /// then the catch-all archiver for ordinary group messages.
    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let db_command = self.db.clone();
        let scheduler = self.scheduler.clone();
        let db_callback = self.db.clone();
        let db_archive = self.db.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<crate::bot::commands::Command>()
                    .endpoint(move |bot, msg, cmd| {
                        let db = db_command.clone();
                        let scheduler = scheduler.clone();
                        async move {
                            message::command_handler(bot, msg, cmd, db, scheduler)
                                .await
                                .map_err(Into::into)
                        }
                    }),
            )
            .branch(Update::filter_callback_query().endpoint(move |bot, q| {
                let db = db_callback.clone();
                async move { callback::callback_handler(bot, q, db).await.map_err(Into::into) }
            }))
            .branch(Update::filter_message().endpoint(move |bot, msg| {
                let db = db_archive.clone();
                async move { archive::archive_handler(bot, msg, db).await.map_err(Into::into) }
            }))
    }
}
