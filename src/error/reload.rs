use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a handler source file into a registered descriptor.
#[derive(Error, Debug)]
pub enum ReloadError {
    /// The file could not be read.
    #[error("Failed to read handler source {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid handler source JSON.
    #[error("Failed to parse handler source {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The source names an action that is not compiled into the bot.
    #[error("Unknown action '{action}' referenced by {name}")]
    UnknownAction { name: String, action: String },

    /// The source names a permission that does not exist.
    #[error("Unknown permission '{permission}' referenced by {name}")]
    UnknownPermission { name: String, permission: String },

    /// The source lists a role ID that is not a snowflake.
    #[error("Invalid role ID '{role}' referenced by {name}")]
    InvalidRole { name: String, role: String },

    /// An event listener source does not say which event it listens to.
    #[error("Listener {name} has no trigger")]
    MissingTrigger { name: String },

    /// The action cannot be bound to the requested namespace.
    #[error("Action '{action}' referenced by {name} cannot be used as a {kind} handler")]
    UnsupportedKind {
        name: String,
        action: String,
        kind: String,
    },

    /// The source names a component type that does not exist.
    #[error("Unknown component type '{component_type}' referenced by {name}")]
    UnknownComponentType { name: String, component_type: String },

    /// A cooldown or rate-limit window is not a usable length.
    #[error("Invalid {field} '{value}' for {name}: must be at most 365 days")]
    InvalidDuration {
        name: String,
        field: &'static str,
        value: String,
    },
}
