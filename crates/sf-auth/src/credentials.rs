//! Credential sources.
//!
//! All credential types implement custom Debug to redact sensitive data.

use crate::error::{Error, ErrorKind, Result};

/// How a session is obtained.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A pre-obtained access token, trusted as-is.
    BearerToken { token: String, instance_url: String },
    /// OAuth 2.0 username-password grant.
    PasswordGrant(PasswordCredentials),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::BearerToken { instance_url, .. } => f
                .debug_struct("BearerToken")
                .field("token", &"[REDACTED]")
                .field("instance_url", instance_url)
                .finish(),
            Credentials::PasswordGrant(creds) => {
                f.debug_tuple("PasswordGrant").field(creds).finish()
            }
        }
    }
}

impl Credentials {
    /// Credentials for an access token obtained elsewhere.
    pub fn bearer(token: impl Into<String>, instance_url: impl Into<String>) -> Self {
        Credentials::BearerToken {
            token: token.into(),
            instance_url: instance_url.into(),
        }
    }

    /// Credentials for the username-password grant.
    pub fn password(credentials: PasswordCredentials) -> Self {
        Credentials::PasswordGrant(credentials)
    }

    /// Check that every required value is present.
    pub fn validate(&self) -> Result<()> {
        match self {
            Credentials::BearerToken {
                token,
                instance_url,
            } => {
                if token.is_empty() {
                    return Err(Error::config("access token cannot be empty"));
                }
                if instance_url.trim_end_matches('/').is_empty() {
                    return Err(Error::config(
                        "instance URL is required with an access token",
                    ));
                }
                Ok(())
            }
            Credentials::PasswordGrant(creds) => creds.validate(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// An access token wins when both it and the instance URL are set:
    /// - `SF_ACCESS_TOKEN` or `SALESFORCE_ACCESS_TOKEN`
    /// - `SF_INSTANCE_URL` or `SALESFORCE_INSTANCE_URL`
    ///
    /// Otherwise all four password grant values are required:
    /// - `SF_CLIENT_ID` or `SALESFORCE_CLIENT_ID`
    /// - `SF_CLIENT_SECRET` or `SALESFORCE_CLIENT_SECRET`
    /// - `SF_USERNAME` or `SALESFORCE_USERNAME`
    /// - `SF_PASSWORD` or `SALESFORCE_PASSWORD`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |suffix: &str| {
            lookup(&format!("SF_{}", suffix))
                .or_else(|| lookup(&format!("SALESFORCE_{}", suffix)))
                .filter(|value| !value.is_empty())
        };
        let required = |suffix: &str| {
            var(suffix).ok_or_else(|| Error::new(ErrorKind::EnvVar(format!("SF_{}", suffix))))
        };

        if let (Some(token), Some(instance_url)) = (var("ACCESS_TOKEN"), var("INSTANCE_URL")) {
            return Ok(Credentials::bearer(token, instance_url));
        }

        Ok(Credentials::PasswordGrant(PasswordCredentials::new(
            required("CLIENT_ID")?,
            required("CLIENT_SECRET")?,
            required("USERNAME")?,
            required("PASSWORD")?,
        )))
    }
}

/// Connected-app and user credentials for the username-password grant.
///
/// Secrets are redacted in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredentials {
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
}

impl std::fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl PasswordCredentials {
    /// Create password grant credentials. Use [`validate`](Self::validate)
    /// to check them.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Fails when any value is empty or whitespace only.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("username", &self.username),
            ("password", &self.password),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::config(format!("{} cannot be empty", name)));
            }
        }
        Ok(())
    }

    /// The connected app's consumer key.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Form fields for the token request, in wire order.
    pub(crate) fn grant_params(&self) -> [(&'static str, &str); 5] {
        [
            ("grant_type", "password"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ]
    }
}
