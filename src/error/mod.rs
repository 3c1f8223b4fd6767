//! Error types for startup, persistence and the dispatch core.
//!
//! `AppError` is the top-level error used by startup code, repositories and services.
//! The dispatch core has its own narrower errors: `ActionError` for handler faults,
//! `ResponderError` for failed replies and `ReloadError` for handler source problems.
//! Authorization failures and throttling are not errors at all; they are `Denial`
//! values produced by the policy chain.

pub mod action;
pub mod config;
pub mod internal;
pub mod reload;
pub mod responder;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError};

pub use action::ActionError;
pub use reload::ReloadError;
pub use responder::ResponderError;

/// Top-level application error type.
///
/// Aggregates the errors that can occur while starting the bot and while services
/// talk to the store or to Discord. Most variants use `#[from]` for automatic
/// conversion so callers can rely on `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Unexpected data found in the store.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error from the throttle sweeper.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Filesystem watcher error from the handler source watcher.
    #[error(transparent)]
    WatchErr(#[from] notify::Error),

    /// Handler source could not be loaded at startup.
    #[error(transparent)]
    ReloadErr(#[from] ReloadError),

    /// Stored usage document could not be decoded.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Filesystem error while reading handler sources or writing error records.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
