use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::EnvFilter;

use crate::{
    application::{
        handlers::broadcast::BroadcastDispatcher,
        services::{BroadcastTransport, SystemClock},
        usecases::{
            clear_messages::ClearMessagesUseCase, list_messages::ListMessagesUseCase,
            register_chat::RegisterChatUseCase, schedule_message::ScheduleMessageUseCase,
        },
    },
    config::Config,
    infrastructure::{
        repositories::sqlite::{SqliteChatRepository, SqliteMessageRepository},
        scheduler,
        telegram::TelegramApi,
    },
    presentation::bot::AdminBot,
};

mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_parse().map_err(anyhow::Error::msg)?;

    let options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    sqlx::migrate!().run(&pool).await?;

    let messages = SqliteMessageRepository::new(pool.clone());
    let chats = SqliteChatRepository::new(pool);
    let api = TelegramApi::new(config.bot_token);

    let dispatcher = Arc::new(BroadcastDispatcher::new(
        messages.clone(),
        chats.clone(),
        api.clone() as Arc<dyn BroadcastTransport>,
        Arc::new(SystemClock),
    ));
    scheduler::spawn(
        dispatcher,
        Duration::from_secs(config.dispatch_interval_secs),
    );

    let bot = AdminBot::new(
        api,
        ScheduleMessageUseCase::new(messages.clone()),
        RegisterChatUseCase::new(chats),
        ListMessagesUseCase::new(messages.clone()),
        ClearMessagesUseCase::new(messages),
    );

    tracing::info!("broadcaster started");
    bot.run().await
}
