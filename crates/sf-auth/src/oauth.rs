//! OAuth 2.0 token exchange.
//!
//! [`OAuthClient`] posts form-encoded grants to `<login_url>/services/oauth2/token`
//! and turns the reply into either a [`TokenResponse`] or an
//! [`ErrorKind::AuthRejected`] carrying the server's [`TokenErrorCode`].

use chrono::{DateTime, Utc};
use forcekit_client::{ClientConfig, HttpExecutor};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::credentials::PasswordCredentials;
use crate::error::{Error, ErrorKind, Result};

const TOKEN_PATH: &str = "/services/oauth2/token";

/// Client for a Salesforce OAuth token endpoint.
///
/// Every call is one POST; failures are reported, never retried.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    login_url: String,
    http: HttpExecutor,
}

impl OAuthClient {
    /// Create a client for `login_url` with default HTTP configuration.
    pub fn new(login_url: impl Into<String>) -> Result<Self> {
        Self::with_config(login_url, ClientConfig::default())
    }

    /// Create a client for `login_url`.
    ///
    /// The login URL must be absolute and must not end with `/`.
    pub fn with_config(login_url: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let login_url = login_url.into();
        validate_login_url(&login_url)?;

        Ok(Self {
            login_url,
            http: HttpExecutor::new(config)?,
        })
    }

    /// The login URL tokens are requested from.
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Run the username-password grant.
    ///
    /// Credentials are validated first; nothing is sent when a value is
    /// missing.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn password_grant(&self, credentials: &PasswordCredentials) -> Result<TokenResponse> {
        credentials.validate()?;
        self.request_token(&credentials.grant_params()).await
    }

    /// Submit an arbitrary grant form to the token endpoint.
    ///
    /// Parameter values are not logged.
    #[instrument(skip(self, params), fields(login_url = %self.login_url))]
    pub async fn request_token<T: Serialize>(&self, params: &T) -> Result<TokenResponse> {
        let request = self
            .http
            .post(format!("{}{}", self.login_url, TOKEN_PATH))
            .header("Accept", "application/json")
            .form(params)?;

        let response = self.http.send(request).await?;
        let status = response.status();
        let success = response.is_success();
        let body = response.text().await?;

        if !success {
            return Err(rejection(status, &body));
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            Error::with_source(
                ErrorKind::Protocol(format!("unparsable token response: {}", e)),
                e,
            )
        })?;

        if token.access_token().is_none() {
            return Err(Error::protocol("token response is missing access_token"));
        }
        if token.instance_url().is_none() {
            return Err(Error::protocol("token response is missing instance_url"));
        }

        debug!(instance_url = ?token.instance_url, "Token obtained");
        Ok(token)
    }
}

fn validate_login_url(login_url: &str) -> Result<()> {
    if login_url.is_empty() {
        return Err(Error::config("login URL cannot be empty"));
    }
    if login_url.ends_with('/') {
        return Err(Error::config(
            "custom login URL cannot contain a trailing slash",
        ));
    }
    url::Url::parse(login_url)?;
    Ok(())
}

fn rejection(status: u16, body: &str) -> Error {
    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(error) => Error::new(ErrorKind::AuthRejected {
            code: error.error,
            description: error.error_description,
        }),
        Err(_) => Error::protocol(format!(
            "token endpoint returned HTTP {} without an OAuth error body",
            status
        )),
    }
}

/// Token response from the OAuth endpoint.
///
/// Every field is optional on the wire. Sensitive fields are redacted in
/// Debug output.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Identity URL of the user.
    #[serde(default)]
    pub id: Option<String>,
    /// Milliseconds since the epoch, as a string.
    #[serde(default)]
    pub issued_at: Option<String>,
    /// Instance URL.
    #[serde(default)]
    pub instance_url: Option<String>,
    /// Access token.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Refresh token, when the connected app grants one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Scopes granted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("TokenResponse")
            .field("id", &self.id)
            .field("issued_at", &self.issued_at)
            .field("instance_url", &self.instance_url)
            .field("access_token", &redacted(&self.access_token))
            .field("refresh_token", &redacted(&self.refresh_token))
            .field("signature", &redacted(&self.signature))
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

impl TokenResponse {
    /// The access token, if present and non-empty.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// The instance URL, if present and non-empty.
    pub fn instance_url(&self) -> Option<&str> {
        self.instance_url.as_deref().filter(|u| !u.is_empty())
    }

    /// `issued_at` as a timestamp.
    pub fn issued_at_time(&self) -> Option<DateTime<Utc>> {
        let millis = self.issued_at.as_deref()?.parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }
}

/// Error code from a rejected token request.
///
/// Codes without a named variant are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum TokenErrorCode {
    /// `invalid_client`
    InvalidClient,
    /// `invalid_client_id`
    InvalidClientId,
    /// `invalid_grant`
    InvalidGrant,
    Other(String),
}

impl TokenErrorCode {
    /// The code as sent by the server.
    pub fn as_str(&self) -> &str {
        match self {
            TokenErrorCode::InvalidClient => "invalid_client",
            TokenErrorCode::InvalidClientId => "invalid_client_id",
            TokenErrorCode::InvalidGrant => "invalid_grant",
            TokenErrorCode::Other(code) => code,
        }
    }
}

impl From<String> for TokenErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "invalid_client" => TokenErrorCode::InvalidClient,
            "invalid_client_id" => TokenErrorCode::InvalidClientId,
            "invalid_grant" => TokenErrorCode::InvalidGrant,
            _ => TokenErrorCode::Other(code),
        }
    }
}

impl From<&str> for TokenErrorCode {
    fn from(code: &str) -> Self {
        TokenErrorCode::from(code.to_string())
    }
}

impl From<TokenErrorCode> for String {
    fn from(code: TokenErrorCode) -> Self {
        match code {
            TokenErrorCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TokenErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth error response body.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: TokenErrorCode,
    #[serde(default)]
    error_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn creds() -> PasswordCredentials {
        PasswordCredentials::new("cid", "csecret", "user@example.com", "p&ss word")
    }

    #[test]
    fn test_login_url_validation() {
        assert!(OAuthClient::new("https://login.salesforce.com").is_ok());

        let err = OAuthClient::new("https://login.salesforce.com/").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(ref m) if m.contains("trailing slash")));

        let err = OAuthClient::new("login.salesforce.com").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(_)));

        let err = OAuthClient::new("").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
    }

    #[test]
    fn test_token_error_code_round_trip() {
        for code in ["invalid_client", "invalid_client_id", "invalid_grant", "unsupported_grant_type"] {
            let parsed = TokenErrorCode::from(code);
            assert_eq!(parsed.as_str(), code);
            assert_eq!(String::from(parsed), code);
        }
        assert_eq!(TokenErrorCode::from("invalid_grant"), TokenErrorCode::InvalidGrant);
        assert_eq!(
            TokenErrorCode::from("inactive_user"),
            TokenErrorCode::Other("inactive_user".to_string())
        );
    }

    #[test]
    fn test_token_response_issued_at_time() {
        let token = TokenResponse {
            issued_at: Some("1700000000000".to_string()),
            ..Default::default()
        };
        assert_eq!(token.issued_at_time().unwrap().timestamp(), 1_700_000_000);

        let token = TokenResponse {
            issued_at: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(token.issued_at_time().is_none());
    }

    #[test]
    fn test_token_response_debug_redacts_tokens() {
        let token = TokenResponse {
            access_token: Some("super_secret_access_token".to_string()),
            refresh_token: Some("super_secret_refresh_token".to_string()),
            instance_url: Some("https://na1.salesforce.com".to_string()),
            signature: Some("signature_value".to_string()),
            ..Default::default()
        };

        let debug_output = format!("{:?}", token);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(debug_output.contains("https://na1.salesforce.com"));
        assert!(!debug_output.contains("super_secret_access_token"));
        assert!(!debug_output.contains("super_secret_refresh_token"));
        assert!(!debug_output.contains("signature_value"));
    }

    #[tokio::test]
    async fn test_password_grant_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .and(header("Accept", "application/json"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string(
                "grant_type=password&client_id=cid&client_secret=csecret\
                 &username=user%40example.com&password=p%26ss+word",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "https://login.salesforce.com/id/00D/005",
                "issued_at": "1700000000000",
                "instance_url": "https://na1.salesforce.com",
                "access_token": "00Dxx!token",
                "signature": "sig",
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OAuthClient::new(mock_server.uri()).unwrap();
        let token = client.password_grant(&creds()).await.unwrap();

        assert_eq!(token.access_token(), Some("00Dxx!token"));
        assert_eq!(token.instance_url(), Some("https://na1.salesforce.com"));
        assert!(token.refresh_token.is_none());
    }

    #[tokio::test]
    async fn test_invalid_credentials_send_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = OAuthClient::new(mock_server.uri()).unwrap();
        let blank = PasswordCredentials::new("cid", "csecret", "", "pw");
        let err = client.password_grant(&blank).await.unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Config(_)));
    }

    #[tokio::test]
    async fn test_rejection_keeps_unknown_code_verbatim() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "inactive_user",
                "error_description": "user is inactive"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OAuthClient::new(mock_server.uri()).unwrap();
        let err = client.password_grant(&creds()).await.unwrap_err();

        match err.kind {
            ErrorKind::AuthRejected { code, description } => {
                assert_eq!(code, TokenErrorCode::Other("inactive_user".to_string()));
                assert_eq!(description, "user is inactive");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejection_with_known_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "authentication failure"
            })))
            .mount(&mock_server)
            .await;

        let client = OAuthClient::new(mock_server.uri()).unwrap();
        let err = client.password_grant(&creds()).await.unwrap_err();

        assert!(err.is_auth_rejected());
        assert!(matches!(
            err.kind,
            ErrorKind::AuthRejected { code: TokenErrorCode::InvalidGrant, .. }
        ));
    }

    #[tokio::test]
    async fn test_non_oauth_error_body_is_protocol_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&mock_server)
            .await;

        let client = OAuthClient::new(mock_server.uri()).unwrap();
        let err = client.password_grant(&creds()).await.unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Protocol(_)));
    }

    #[tokio::test]
    async fn test_success_missing_fields_is_protocol_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "00Dxx!token"
            })))
            .mount(&mock_server)
            .await;

        let client = OAuthClient::new(mock_server.uri()).unwrap();
        let err = client.password_grant(&creds()).await.unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Protocol(ref m) if m.contains("instance_url")));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = OAuthClient::new("http://127.0.0.1:9").unwrap();
        let err = client.password_grant(&creds()).await.unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Transport(_)), "{:?}", err.kind);
    }

    #[tokio::test]
    async fn test_request_token_custom_grant() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_string("grant_type=refresh_token&refresh_token=rt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "instance_url": "https://na1.salesforce.com",
                "access_token": "fresh"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OAuthClient::new(mock_server.uri()).unwrap();
        let token = client
            .request_token(&[("grant_type", "refresh_token"), ("refresh_token", "rt")])
            .await
            .unwrap();

        assert_eq!(token.access_token(), Some("fresh"));
    }
}
