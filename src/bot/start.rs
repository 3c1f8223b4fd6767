use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

use crate::{
    bot::{handler::Handler, platform::SerenityPlatform},
    config::Config,
    dispatch::dispatcher::Dispatcher,
    error::AppError,
};

/// Builds the Discord client and connects the platform to it.
///
/// The platform is created before the client so the dispatcher can hold it; after
/// this returns, replies and moderation calls go through the client's HTTP handle.
///
/// # Arguments
/// - `config` - Application configuration with the bot token and command prefix
/// - `dispatcher` - Dispatcher receiving every converted gateway event
/// - `platform` - Platform to connect to the new client
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError)` - Client could not be built
pub async fn init_bot(
    config: &Config,
    dispatcher: Arc<Dispatcher>,
    platform: &SerenityPlatform,
) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::DIRECT_MESSAGES;

    let handler = Handler::new(dispatcher, config.command_prefix.clone());

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    platform.connect(client.http.clone(), client.cache.clone());

    Ok(client)
}

/// Starts the Discord bot in a blocking manner
///
/// Should be called from within a tokio::spawn task since it runs until the bot
/// shuts down.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
