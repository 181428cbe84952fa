//! Validated construction of [`ForceClient`].

use forcekit_auth::{authenticate, Credentials, PasswordCredentials, DEFAULT_LOGIN_URL};
use forcekit_client::{ApiVersion, ClientConfig, SessionClient};
use tracing::{debug, instrument};

use crate::client::ForceClient;
use crate::error::{Error, Result};

/// Builder for [`ForceClient`].
///
/// Options apply in call order, so a later option overrides an earlier one.
/// The first invalid option is remembered and returned from
/// [`build`](Self::build) before anything is sent.
///
/// ```rust,ignore
/// use forcekit_auth::PasswordCredentials;
/// use forcekit_rest::ForceClient;
///
/// let client = ForceClient::builder()
///     .login_url("https://test.salesforce.com")
///     .api_version("v60.0")
///     .password_credentials(PasswordCredentials::new(
///         "client_id", "client_secret", "user@example.com", "password",
///     ))
///     .build()
///     .await?;
/// ```
#[derive(Debug)]
pub struct ForceClientBuilder {
    login_url: String,
    instance_url: Option<String>,
    api_version: ApiVersion,
    credentials: Option<Credentials>,
    config: ClientConfig,
    error: Option<Error>,
}

impl Default for ForceClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceClientBuilder {
    pub fn new() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            instance_url: None,
            api_version: ApiVersion::default(),
            credentials: None,
            config: ClientConfig::default(),
            error: None,
        }
    }

    fn fail(mut self, err: Error) -> Self {
        if self.error.is_none() {
            self.error = Some(err);
        }
        self
    }

    /// Login endpoint for the password grant. Must not end with `/`.
    pub fn login_url(mut self, login_url: impl Into<String>) -> Self {
        let login_url = login_url.into();
        if login_url.is_empty() {
            return self.fail(Error::config("login URL cannot be empty"));
        }
        if login_url.ends_with('/') {
            return self.fail(Error::config(format!(
                "login URL '{}' must not end with '/'",
                login_url
            )));
        }
        self.login_url = login_url;
        self
    }

    /// Instance URL the access token belongs to.
    pub fn instance_url(mut self, instance_url: impl Into<String>) -> Self {
        let instance_url = instance_url.into();
        if instance_url.is_empty() {
            return self.fail(Error::config("instance URL cannot be empty"));
        }
        if let Some(Credentials::BearerToken {
            instance_url: current,
            ..
        }) = self.credentials.as_mut()
        {
            current.clone_from(&instance_url);
        }
        self.instance_url = Some(instance_url);
        self
    }

    /// REST API version, such as `v62.0`.
    pub fn api_version(mut self, version: &str) -> Self {
        match ApiVersion::parse(version) {
            Ok(version) => {
                self.api_version = version;
                self
            }
            Err(err) => self.fail(err.into()),
        }
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        if user_agent.is_empty() {
            return self.fail(Error::config("user agent cannot be empty"));
        }
        self.config.user_agent = user_agent;
        self
    }

    /// Add one extra header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            return self.fail(Error::config("header name cannot be empty"));
        }
        self.config
            .headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.config.headers.push((name, value.into()));
        self
    }

    /// Add several extra headers.
    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |builder, (name, value)| builder.header(name, value))
    }

    /// Use a pre-obtained access token. Pair it with
    /// [`instance_url`](Self::instance_url), given before or after.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if token.is_empty() {
            return self.fail(Error::config("access token cannot be empty"));
        }
        let instance_url = self.instance_url.clone().unwrap_or_default();
        self.credentials = Some(Credentials::bearer(token, instance_url));
        self
    }

    /// Use the username-password grant.
    pub fn password_credentials(mut self, credentials: PasswordCredentials) -> Self {
        if let Err(err) = credentials.validate() {
            return self.fail(err.into());
        }
        self.credentials = Some(Credentials::password(credentials));
        self
    }

    /// Use any credential source, for example [`Credentials::from_env`].
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        if let Err(err) = credentials.validate() {
            return self.fail(err.into());
        }
        if let Credentials::BearerToken { instance_url, .. } = &credentials {
            self.instance_url = Some(instance_url.clone());
        }
        self.credentials = Some(credentials);
        self
    }

    /// Replace the HTTP configuration. Overrides earlier `user_agent` and
    /// `header` options.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Authenticate and return a ready client.
    ///
    /// Fails without any network call if an option was invalid or no
    /// credentials were given.
    #[instrument(skip(self), fields(login_url = %self.login_url, api_version = %self.api_version))]
    pub async fn build(self) -> Result<ForceClient> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let Some(credentials) = self.credentials else {
            return Err(Error::config(
                "no credentials: set an access token or password credentials",
            ));
        };

        let session = authenticate(
            &credentials,
            &self.login_url,
            self.api_version,
            &self.config,
        )
        .await?;
        debug!(instance_url = %session.instance_url(), "Client ready");

        let client = SessionClient::with_config(session, self.config)?;
        Ok(ForceClient::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use forcekit_auth::TokenErrorCode;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn password_creds() -> PasswordCredentials {
        PasswordCredentials::new("cid", "csecret", "user@example.com", "hunter2")
    }

    #[tokio::test]
    async fn test_build_with_access_token_makes_no_call() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = ForceClient::builder()
            .login_url(mock_server.uri())
            .instance_url("https://na1.salesforce.com")
            .access_token("00Dxx!tok")
            .build()
            .await
            .unwrap();

        assert_eq!(client.instance_url(), "https://na1.salesforce.com");
        assert_eq!(client.session().access_token(), "00Dxx!tok");
        assert_eq!(client.api_version(), "v62.0");
    }

    #[tokio::test]
    async fn test_build_with_password_grant() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .and(header("Accept", "application/json"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains("username=user%40example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "00Dxx!session",
                "instance_url": "https://myorg.my.salesforce.com",
                "id": "https://login.salesforce.com/id/00Dxx/005xx",
                "token_type": "Bearer",
                "issued_at": "1700000000000",
                "signature": "sig"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ForceClient::builder()
            .login_url(mock_server.uri())
            .api_version("v60.0")
            .password_credentials(password_creds())
            .build()
            .await
            .unwrap();

        assert_eq!(client.instance_url(), "https://myorg.my.salesforce.com");
        assert_eq!(client.api_version(), "v60.0");
    }

    #[tokio::test]
    async fn test_build_reports_rejected_credentials() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "authentication failure"
            })))
            .mount(&mock_server)
            .await;

        let err = ForceClient::builder()
            .login_url(mock_server.uri())
            .password_credentials(password_creds())
            .build()
            .await
            .unwrap_err();

        assert!(matches!(
            err.kind,
            ErrorKind::AuthRejected { code: TokenErrorCode::InvalidGrant, ref description }
                if description == "authentication failure"
        ));
    }

    #[tokio::test]
    async fn test_build_without_credentials_is_config_error() {
        let err = ForceClient::builder().build().await.unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_access_token_without_instance_url_is_config_error() {
        let err = ForceClient::builder()
            .access_token("tok")
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(ref m) if m.contains("instance URL")));
    }

    #[tokio::test]
    async fn test_first_error_is_kept() {
        let err = ForceClient::builder()
            .api_version("62.0")
            .login_url("https://login.salesforce.com/")
            .instance_url("https://na1.salesforce.com")
            .access_token("tok")
            .build()
            .await
            .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Config(ref m) if m.contains("API version")));
    }

    #[tokio::test]
    async fn test_later_options_override_earlier_ones() {
        let client = ForceClient::builder()
            .api_version("v58.0")
            .instance_url("https://one.salesforce.com")
            .access_token("first")
            .api_version("v61.0")
            .instance_url("https://two.salesforce.com")
            .access_token("second")
            .build()
            .await
            .unwrap();

        assert_eq!(client.api_version(), "v61.0");
        assert_eq!(client.instance_url(), "https://two.salesforce.com");
        assert_eq!(client.session().access_token(), "second");
    }

    #[tokio::test]
    async fn test_instance_url_after_access_token() {
        let client = ForceClient::builder()
            .access_token("tok")
            .instance_url("https://two.salesforce.com")
            .build()
            .await
            .unwrap();

        assert_eq!(client.instance_url(), "https://two.salesforce.com");
    }

    #[tokio::test]
    async fn test_invalid_password_credentials_make_no_call() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = ForceClient::builder()
            .login_url(mock_server.uri())
            .password_credentials(PasswordCredentials::new("cid", "csecret", "", "pw"))
            .build()
            .await
            .unwrap_err();

        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_headers_and_user_agent_are_sent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Account/describe"))
            .and(header("User-Agent", "my-app/1.0"))
            .and(header("Sforce-Call-Options", "client=my-app"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"name": "Account", "fields": []})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ForceClient::builder()
            .user_agent("my-app/1.0")
            .headers([("Sforce-Call-Options", "client=my-app")])
            .instance_url(mock_server.uri())
            .access_token("tok")
            .build()
            .await
            .unwrap();

        client.describe("Account").await.unwrap();
    }

    #[test]
    fn test_empty_options_are_rejected() {
        assert!(ForceClientBuilder::new().login_url("").error.is_some());
        assert!(ForceClientBuilder::new().user_agent("").error.is_some());
        assert!(ForceClientBuilder::new().header("", "x").error.is_some());
        assert!(ForceClientBuilder::new().instance_url("").error.is_some());
        assert!(ForceClientBuilder::new().access_token("").error.is_some());
        assert!(ForceClientBuilder::new()
            .credentials(Credentials::bearer("tok", ""))
            .error
            .is_some());
    }
}
