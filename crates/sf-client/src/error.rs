//! Error types for forcekit-client.

use crate::response::{sanitize_error_message, ApiError};

/// Result type alias for forcekit-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for forcekit-client operations.
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

    /// Shorthand for a protocol (unexpected response shape) error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Protocol(message.into()))
    }

    /// Returns true if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_) | ErrorKind::Timeout)
    }

    /// Returns true if the server answered with a non-2xx status.
    pub fn is_remote(&self) -> bool {
        matches!(self.kind, ErrorKind::Remote { .. })
    }

    /// Returns the HTTP status for remote errors.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parse the Salesforce error list out of a remote error body.
    ///
    /// Returns an empty list for other kinds or when the body is not in the
    /// `[{errorCode, message, fields}]` shape.
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
    /// Bad or missing input detected before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection, DNS or TLS failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The per-call timeout elapsed.
    #[error("Request timeout")]
    Timeout,

    /// Non-2xx response. `body` is kept exactly as received.
    #[error("Remote error: HTTP {status}: {}", sanitize_error_message(body))]
    Remote { status: u16, body: String },

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body did not match the expected shape.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_decode() {
            ErrorKind::Protocol(err.to_string())
        } else if err.is_builder() {
            ErrorKind::Config(err.to_string())
        } else {
            ErrorKind::Transport(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Protocol(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::Config(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display_messages() {
        let cases: Vec<(ErrorKind, &str)> = vec![
            (
                ErrorKind::Config("missing field".into()),
                "Configuration error: missing field",
            ),
            (
                ErrorKind::Transport("refused".into()),
                "Transport error: refused",
            ),
            (ErrorKind::Timeout, "Request timeout"),
            (
                ErrorKind::Remote {
                    status: 400,
                    body: "bad request".into(),
                },
                "Remote error: HTTP 400: bad request",
            ),
            (
                ErrorKind::NotFound("Account".into()),
                "Not found: Account",
            ),
            (
                ErrorKind::Protocol("unexpected EOF".into()),
                "Protocol error: unexpected EOF",
            ),
        ];

        for (kind, expected_substring) in cases {
            let display = kind.to_string();
            assert!(
                display.contains(expected_substring),
                "Expected '{display}' to contain '{expected_substring}'"
            );
        }
    }

    #[test]
    fn test_remote_display_redacts_but_body_is_untouched() {
        let body = "Session expired: 00Dxx0000001gEF!AQcAQH3k9s7LKbp_token.value";
        let err = Error::new(ErrorKind::Remote {
            status: 401,
            body: body.to_string(),
        });

        assert!(!err.to_string().contains("AQcAQH3k9s7LKbp"));
        match &err.kind {
            ErrorKind::Remote { body: kept, .. } => assert_eq!(kept, body),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_predicates() {
        let err = Error::new(ErrorKind::Timeout);
        assert!(err.is_transport());
        assert!(!err.is_remote());
        assert_eq!(err.status(), None);

        let err = Error::new(ErrorKind::Remote {
            status: 404,
            body: String::new(),
        });
        assert!(err.is_remote());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_api_errors_from_remote_body() {
        let err = Error::new(ErrorKind::Remote {
            status: 400,
            body: r#"[{"errorCode":"INVALID_FIELD","message":"No such column","fields":["Foo"]}]"#
                .to_string(),
        });

        let errors = err.api_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_code, "INVALID_FIELD");
        assert_eq!(errors[0].fields, vec!["Foo".to_string()]);

        assert!(Error::config("x").api_errors().is_empty());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Protocol(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
        assert!(err.to_string().contains("Invalid URL"));
    }
}
