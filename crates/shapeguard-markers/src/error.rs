use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("marker {marker}: {reason}")]
    InvalidArguments { marker: String, reason: String },

    #[error("marker {marker}: missing required argument {argument}")]
    MissingArgument { marker: String, argument: String },

    #[error("marker {marker}: cannot encode enum value as a JSON literal: {source}")]
    Encode {
        marker: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("marker {0} is already registered")]
    Duplicate(String),

    #[error("feature-set activation is already initialized")]
    AlreadyInitialized,
}
