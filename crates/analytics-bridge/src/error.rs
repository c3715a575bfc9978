//! Error types for the analytics bridge.

/// Errors that can be surfaced to the host.
///
/// Malformed report-policy records and non-object event parameters are
/// absorbed silently and never produce one of these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The engine returned no user attributes.
    #[error("User attributes are nil")]
    UserAttributesNil,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The host asked for a method the bridge does not expose.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// A host call carried a missing or mistyped argument.
    #[error("Invalid argument for {method}: {reason}")]
    InvalidArgument { method: String, reason: String },

    /// A pending completion was dropped before it was delivered.
    #[error("Request was cancelled before completion")]
    Cancelled,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;
