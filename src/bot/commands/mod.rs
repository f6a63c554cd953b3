//! Bot commands and their handlers.

pub mod birthday;
pub mod debug;
pub mod menu;
pub mod random;

use teloxide::utils::command::BotCommands;

/// Commands understood by the bot.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Group Memory Bot commands:")]
pub enum Command {
    /// Show command descriptions.
    #[command(description = "Display this help message")]
    Help,
    /// Activate the bot in a group chat.
    #[command(description = "Activate the bot in this group and show the menu")]
    Start,
    /// Redisplay the inline menu.
    #[command(description = "Show the main menu")]
    Menu,
    /// Register the sender's birthday.
    #[command(description = "Register your birthday (MM-DD format)")]
    Birthday {
        /// Month and day, e.g. "03-15".
        date: String,
    },
    /// Replay one archived message right away.
    #[command(description = "Send a random stored memory")]
    Random,
    /// Inspect the archive for this chat.
    #[command(description = "Show archive debug information")]
    Debug,
}
