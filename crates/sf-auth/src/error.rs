//! Error types for forcekit-auth.
//!
//! Error messages never include credential values.

use crate::oauth::TokenErrorCode;

/// Result type alias for forcekit-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for forcekit-auth operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Shorthand for a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Protocol(message.into()))
    }

    /// Returns true if the token endpoint refused the credentials.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self.kind, ErrorKind::AuthRejected { .. })
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Missing or malformed credentials or login URL. No request was sent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The token endpoint answered with an OAuth error.
    #[error("Authentication rejected: {code} - {description}")]
    AuthRejected {
        code: TokenErrorCode,
        description: String,
    },

    /// The token endpoint could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The token endpoint answered with something other than a token or an
    /// OAuth error.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),
}

impl From<forcekit_client::Error> for Error {
    fn from(err: forcekit_client::Error) -> Self {
        use forcekit_client::ErrorKind as Client;

        let kind = match &err.kind {
            Client::Config(msg) => ErrorKind::Config(msg.clone()),
            Client::Transport(msg) => ErrorKind::Transport(msg.clone()),
            Client::Timeout => ErrorKind::Transport("request timeout".to_string()),
            Client::Remote { status, .. } => {
                ErrorKind::Protocol(format!("unexpected HTTP {} from token endpoint", status))
            }
            Client::NotFound(msg) | Client::Protocol(msg) => ErrorKind::Protocol(msg.clone()),
        };
        Error::with_source(kind, err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("invalid login URL: {}", err)), err)
    }
}
