//! The authenticated context shared by every API call.
//!
//! A [`Session`] is produced once by authentication and never mutated
//! afterwards, so it can be cloned freely and shared across tasks.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::{Error, Result};

static API_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d{2}\.0$").expect("API version pattern is valid"));

/// A validated REST API version such as `v62.0`.
///
/// Only `v` + two digits + `.0` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Validate and wrap a version string.
    pub fn parse(version: &str) -> Result<Self> {
        if API_VERSION_PATTERN.is_match(version) {
            Ok(Self(version.to_string()))
        } else {
            Err(Error::config(format!(
                "invalid API version '{}': format should be 'vXX.0'",
                version
            )))
        }
    }

    /// The version string, including the leading `v`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self(crate::DEFAULT_API_VERSION.to_string())
    }
}

impl FromStr for ApiVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Instance endpoint, bearer token and API version.
///
/// The access token is redacted in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    instance_url: String,
    access_token: String,
    api_version: ApiVersion,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Session {
    /// Build a session.
    ///
    /// Fails with a configuration error when either the instance URL or the
    /// token is empty. A trailing slash on the instance URL is dropped.
    pub fn new(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        api_version: ApiVersion,
    ) -> Result<Self> {
        let instance_url = instance_url.into().trim_end_matches('/').to_string();
        let access_token = access_token.into();

        if instance_url.is_empty() {
            return Err(Error::config("instance URL cannot be empty"));
        }
        if access_token.is_empty() {
            return Err(Error::config("access token cannot be empty"));
        }

        Ok(Self {
            instance_url,
            access_token,
            api_version,
        })
    }

    /// The instance URL, without a trailing slash.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// The bearer token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The API version.
    pub fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// `<instance>/services/data/<version>/<path>`.
    pub fn data_url(&self, path: &str) -> String {
        format!(
            "{}/services/data/{}/{}",
            self.instance_url,
            self.api_version,
            path.trim_start_matches('/')
        )
    }
}
