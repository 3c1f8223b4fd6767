mod bot;
mod commands;
mod config;
mod data;
mod dispatch;
mod error;
mod model;
mod reload;
mod scheduler;
mod service;
mod settings;
mod startup;
mod state;
mod util;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::{
    bot::{platform::SerenityPlatform, start},
    commands::ActionCatalog,
    config::Config,
    dispatch::{
        dispatcher::{Dispatcher, Recording},
        policy::BotIdentity,
    },
    error::AppError,
    reload::{watcher::HandlerWatcher, Reloader},
    scheduler::throttle_sweep,
    service::error_sink::ErrorSink,
    settings::SettingsSource,
    state::BotState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let registry = startup::build_registry().await;

    let settings = SettingsSource::new(&config.settings_path);
    let error_sink = ErrorSink::new(&config.errors_dir, settings.clone());

    let platform = Arc::new(SerenityPlatform::new());
    let state = BotState::new(db, platform.clone(), platform.clone());

    let identity = BotIdentity {
        owner_id: config.owner_id,
        admin_ids: config.admin_ids.clone(),
        dev_guild_ids: config.dev_guild_ids.clone(),
    };
    let recording = Recording {
        settings,
        error_sink: error_sink.clone(),
        command_logs_channel_id: config.command_logs_channel_id,
        command_prefix: config.command_prefix.clone(),
    };
    let dispatcher = Arc::new(Dispatcher::new(registry.clone(), state, identity, recording));

    let reloader = Arc::new(Reloader::new(
        registry,
        ActionCatalog::standard(),
        error_sink,
        &config.handlers_dir,
    ));
    let loaded = reloader.load_dir().await?;
    tracing::info!(
        "Loaded {} handler sources from {}",
        loaded,
        reloader.dir().display()
    );

    // Dropping the watcher stops it
    let _watcher = HandlerWatcher::start(reloader)?;

    let mut scheduler =
        throttle_sweep::start_scheduler(dispatcher.cooldowns(), dispatcher.rate_limits()).await?;

    let client = start::init_bot(&config, dispatcher, &platform).await?;

    tracing::info!("Starting gatebot");

    let bot = tokio::spawn(async move {
        if let Err(e) = start::start_bot(client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    tokio::select! {
        _ = bot => tracing::warn!("Discord bot stopped"),
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutting down"),
    }

    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!("Failed to stop throttle sweeper: {}", e);
    }

    Ok(())
}
