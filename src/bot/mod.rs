//! Telegram-facing layer: command definitions and update handlers.

pub mod commands;
pub mod handlers;
