//! Error types for forcekit-rest.
//!
//! This is the taxonomy callers see. Errors from forcekit-client and
//! forcekit-auth are folded into it kind for kind.

use forcekit_auth::TokenErrorCode;
use forcekit_client::{sanitize_error_message, ApiError};

use crate::codec::DecodeError;

/// Result type alias for forcekit-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for forcekit-rest operations.
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

    /// Returns true if the object or record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// Returns true if the login endpoint refused the credentials.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self.kind, ErrorKind::AuthRejected { .. })
    }

    /// Returns true if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }

    /// Returns true if the input was rejected before any request was sent.
    pub fn is_config(&self) -> bool {
        matches!(self.kind, ErrorKind::Config(_))
    }

    /// Returns the HTTP status for remote errors.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parse the Salesforce error list out of a remote error body.
    pub fn api_errors(&self) -> Vec<ApiError> {
        match &self.kind {
            ErrorKind::Remote { body, .. } => ApiError::parse_body(body),
            _ => Vec::new(),
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Bad or missing input. No request was sent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The login endpoint refused the credentials.
    #[error("Authentication rejected: {code} - {description}")]
    AuthRejected {
        code: TokenErrorCode,
        description: String,
    },

    /// Connection, DNS, TLS failure or timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx response. `body` is kept exactly as received.
    #[error("Remote error: HTTP {status}: {}", sanitize_error_message(body))]
    Remote { status: u16, body: String },

    /// The response did not have the expected shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The object or record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record could not be decoded into the target type.
    #[error("Decode error: {0}")]
    Decode(DecodeError),
}

impl From<forcekit_client::Error> for Error {
    fn from(err: forcekit_client::Error) -> Self {
        use forcekit_client::ErrorKind as Client;

        let kind = match &err.kind {
            Client::Config(msg) => ErrorKind::Config(msg.clone()),
            Client::Transport(msg) => ErrorKind::Transport(msg.clone()),
            Client::Timeout => ErrorKind::Transport("request timeout".to_string()),
            Client::Remote { status, body } => ErrorKind::Remote {
                status: *status,
                body: body.clone(),
            },
            Client::NotFound(msg) => ErrorKind::NotFound(msg.clone()),
            Client::Protocol(msg) => ErrorKind::Protocol(msg.clone()),
        };
        Error::with_source(kind, err)
    }
}

impl From<forcekit_auth::Error> for Error {
    fn from(err: forcekit_auth::Error) -> Self {
        use forcekit_auth::ErrorKind as Auth;

        let kind = match &err.kind {
            Auth::Config(msg) => ErrorKind::Config(msg.clone()),
            Auth::AuthRejected { code, description } => ErrorKind::AuthRejected {
                code: code.clone(),
                description: description.clone(),
            },
            Auth::Transport(msg) => ErrorKind::Transport(msg.clone()),
            Auth::Protocol(msg) => ErrorKind::Protocol(msg.clone()),
            Auth::EnvVar(var) => ErrorKind::Config(format!("environment variable not set: {}", var)),
        };
        Error::with_source(kind, err)
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::new(ErrorKind::Decode(err))
    }
}
