use sea_orm::DbErr;
use thiserror::Error;

use crate::error::{AppError, ResponderError};

/// Fault raised by a handler action.
///
/// Any `ActionError` that escapes `Action::execute` is caught at the dispatch
/// boundary, written to the error sink and answered with a generic failure reply.
/// Expected outcomes (a target the bot cannot kick, a missing channel) are replied
/// to by the action itself and return `Ok(())`.
#[derive(Error, Debug)]
pub enum ActionError {
    /// Store access failed.
    #[error(transparent)]
    Db(#[from] DbErr),

    /// Discord API call failed.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    /// A service call failed.
    #[error(transparent)]
    Service(#[from] AppError),

    /// Reply or send through the responder failed inside the action.
    #[error(transparent)]
    Responder(#[from] ResponderError),

    /// A required option was absent or malformed.
    #[error("Missing or invalid argument '{0}'")]
    MissingArgument(String),

    /// The action needs a guild but the event came from a direct message.
    #[error("This action can only run inside a server")]
    NotInGuild,

    /// The action panicked; the payload message is preserved.
    #[error("Handler panicked: {0}")]
    Panicked(String),

    /// The action's task was cancelled before it finished.
    #[error("Handler task was cancelled")]
    Cancelled,
}

impl From<serenity::Error> for ActionError {
    fn from(err: serenity::Error) -> Self {
        ActionError::Discord(Box::new(err))
    }
}
