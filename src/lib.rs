//! # Group Memory Bot
//!
//! A Telegram bot for group chats that archives messages, replays them at
//! random intervals as "memories", and celebrates member birthdays.
//!
//! ## Features
//! - Archives every non-bot group message (text and media)
//! - Replays a random archived message every 30 minutes to 3 hours
//! - Per-chat birthday registry with an optional celebratory photo
//! - Daily birthday check with automatic notification reset
//! - Long-polling or webhook deployment, selected by configuration
//! - Persistent storage with SQLite

/// Bot command definitions and update handlers
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connection, and schema creation
pub mod database;
/// Background services: memory replay, birthday checks, health endpoints
pub mod services;
/// Utility functions for validation and logging
pub mod utils;
