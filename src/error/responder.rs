use thiserror::Error;

/// Failure to deliver a reply or a channel message.
///
/// The dispatch core swallows these at the call site and logs them at warn level.
#[derive(Error, Debug)]
pub enum ResponderError {
    /// Discord rejected the request.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    /// The platform client is not connected yet.
    #[error("Discord HTTP client is not available yet")]
    NotConnected,
}

impl From<serenity::Error> for ResponderError {
    fn from(err: serenity::Error) -> Self {
        ResponderError::Discord(Box::new(err))
    }
}
