//! HTTP response handling.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};

/// Wrapper around an HTTP response.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    ///
    /// A body that is not valid JSON for `T` is a protocol error.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            Error::with_source(
                ErrorKind::Protocol(format!("unexpected response body: {}", e)),
                e,
            )
        })
    }

    /// Turn a non-2xx response into [`ErrorKind::Remote`], keeping the body verbatim.
    pub async fn error_for_status(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let body = self.text().await.unwrap_or_default();
        Err(Error::new(ErrorKind::Remote { status, body }))
    }
}

/// One entry of a Salesforce REST error body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiError {
    #[serde(rename = "errorCode", alias = "error_code")]
    pub error_code: String,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl ApiError {
    /// Parse a body in either the list or the single-object shape.
    pub fn parse_body(body: &str) -> Vec<ApiError> {
        if let Ok(errors) = serde_json::from_str::<Vec<ApiError>>(body) {
            return errors;
        }
        serde_json::from_str::<ApiError>(body)
            .map(|err| vec![err])
            .unwrap_or_default()
    }
}

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+").expect("token pattern is valid")
});

static SESSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sid=[A-Za-z0-9]{20,}").expect("session pattern is valid"));

/// Sanitize a message before it is displayed or logged.
///
/// - Truncates messages longer than 500 characters
/// - Removes anything shaped like an access token
/// - Removes session IDs
pub fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let sanitized = TOKEN_PATTERN.replace_all(message, "[REDACTED_TOKEN]");
    let mut sanitized = SESSION_PATTERN
        .replace_all(&sanitized, "sid=[REDACTED]")
        .to_string();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
