//! # Group Memory Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database, starts
//! the birthday service and health server, and runs the Telegram bot on
//! long-polling or webhook depending on configuration.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod config;
mod database;
mod services;
mod utils;

use crate::bot::commands::Command;
use crate::bot::handlers::BotHandler;
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::services::birthday::BirthdayService;
use crate::services::health::HealthService;
use crate::services::memory::MemoryScheduler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "group_memory_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Group Memory Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}",
        config.database_url, config.http_port
    );

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.init_schema().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");

    // Initialize bot
    info!("Initializing Telegram bot...");
    let telegram_bot = Bot::new(config.telegram_bot_token.clone());
    if let Err(e) = telegram_bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!("Failed to publish the command menu: {}", e);
    }

    let scheduler = MemoryScheduler::new(telegram_bot.clone(), db_arc.as_ref().clone());
    let handler = BotHandler::new(db_arc.as_ref().clone(), scheduler);
    info!("Telegram bot initialized successfully");

    // Initialize and start the birthday service
    let mut birthday_service = match BirthdayService::new(telegram_bot.clone(), db_arc.clone()).await
    {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to create birthday service: {}", e);
            return Err(anyhow::anyhow!("Failed to create birthday service: {}", e));
        }
    };

    if let Err(e) = birthday_service.start().await {
        tracing::error!("Failed to start birthday service: {}", e);
    } else {
        info!("Birthday service started successfully");
    }

    // Initialize health service
    let health_service = HealthService::new(db_arc.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Run the dispatcher on long-polling or webhook
    let webhook_url = config.webhook_url()?;
    let webhook_port = config.webhook_port;

    let bot_task = tokio::spawn(async move {
        let mut dispatcher = Dispatcher::builder(telegram_bot.clone(), handler.schema())
            .enable_ctrlc_handler()
            .build();

        match webhook_url {
            Some(url) => {
                let address = SocketAddr::from(([0, 0, 0, 0], webhook_port));
                // The URL embeds the bot token, so only the port is logged.
                info!("Receiving updates via webhook listener on port {}", webhook_port);
                match webhooks::axum(telegram_bot, webhooks::Options::new(address, url)).await {
                    Ok(listener) => {
                        dispatcher
                            .dispatch_with_listener(
                                listener,
                                LoggingErrorHandler::with_custom_text(
                                    "An error from the update listener",
                                ),
                            )
                            .await;
                    }
                    Err(e) => {
                        tracing::error!("Failed to start webhook listener: {}", e);
                    }
                }
            }
            None => {
                info!("Receiving updates via long-polling");
                dispatcher.dispatch().await;
            }
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    // Stop the birthday service on shutdown
    if let Err(e) = birthday_service.stop().await {
        tracing::warn!("Error stopping birthday service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
