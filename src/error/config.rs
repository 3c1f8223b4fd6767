use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The bot requires this environment variable to be defined. Check the
    /// `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but could not be parsed as a Discord ID.
    #[error("Invalid Discord ID in {name}: '{value}'")]
    InvalidId {
        /// Name of the environment variable
        name: String,
        /// The value that failed to parse
        value: String,
    },
}
