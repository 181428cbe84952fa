//! Authenticated client with typed JSON methods.
//!
//! `SessionClient` combines a [`Session`] with an [`HttpExecutor`] and stamps
//! every request with the bearer token, JSON content negotiation and the
//! configured extra headers.
//!
//! ## Security
//!
//! - The access token is redacted in Debug output
//! - Request bodies are skipped in tracing spans

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::instrument;

use crate::client::HttpExecutor;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::request::RequestBuilder;
use crate::session::Session;

const MEDIA_TYPE_JSON: &str = "application/json";

/// Authenticated Salesforce API client.
///
/// Cheap to clone; clones share the connection pool. Nothing in it changes
/// after construction, so it can be used from many tasks at once.
#[derive(Clone)]
pub struct SessionClient {
    http: HttpExecutor,
    session: Session,
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl SessionClient {
    /// Create a client for the session with default configuration.
    pub fn new(session: Session) -> Result<Self> {
        Self::with_config(session, ClientConfig::default())
    }

    /// Create a client for the session with custom configuration.
    pub fn with_config(session: Session, config: ClientConfig) -> Result<Self> {
        let http = HttpExecutor::new(config)?;
        Ok(Self { http, session })
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        self.session.instance_url()
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.session.api_version().as_str()
    }

    /// Build the full URL for a path.
    ///
    /// Absolute URLs are returned unchanged when they share the instance
    /// origin and rejected otherwise. Anything else is resolved against the
    /// instance URL.
    pub fn url(&self, path: &str) -> Result<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            let target = url::Url::parse(path)?;
            let instance = url::Url::parse(self.session.instance_url())?;
            if target.origin() != instance.origin() {
                return Err(Error::config(format!(
                    "refusing to send credentials to {}",
                    target.origin().ascii_serialization()
                )));
            }
            Ok(path.to_string())
        } else if path.starts_with('/') {
            Ok(format!("{}{}", self.session.instance_url(), path))
        } else {
            Ok(format!("{}/{}", self.session.instance_url(), path))
        }
    }

    /// Build the REST API URL for a path.
    ///
    /// Example: `rest_url("sobjects/Account")` -> `<instance>/services/data/v62.0/sobjects/Account`
    pub fn rest_url(&self, path: &str) -> String {
        self.session.data_url(path)
    }

    // =========================================================================
    // Base HTTP Methods (with authentication)
    // =========================================================================

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .bearer_auth(self.session.access_token())
            .header("Content-Type", MEDIA_TYPE_JSON)
            .header("Accept", MEDIA_TYPE_JSON);

        self.http
            .config()
            .headers
            .iter()
            .fold(request, |req, (name, value)| req.header(name, value))
    }

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.authenticated(self.http.get(url))
    }

    /// Create a POST request builder with authentication.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.authenticated(self.http.post(url))
    }

    /// Create a PATCH request builder with authentication.
    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.authenticated(self.http.patch(url))
    }

    /// Create a DELETE request builder with authentication.
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.authenticated(self.http.delete(url))
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// GET request with JSON response deserialization.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.get(&self.url(url)?);
        self.http.send_json(request).await
    }

    /// GET request to REST API with JSON response.
    pub async fn rest_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_json(&self.rest_url(path)).await
    }

    /// POST request with JSON body and response.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.post(&self.url(url)?).json(body)?;
        self.http.send_json(request).await
    }

    /// POST request to REST API with JSON body and response.
    pub async fn rest_post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.post_json(&self.rest_url(path), body).await
    }

    /// PATCH request with JSON body. The response body is not read.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn patch_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<()> {
        let request = self.patch(&self.url(url)?).json(body)?;
        self.http.execute(request).await?;
        Ok(())
    }

    /// PATCH request to REST API with JSON body.
    pub async fn rest_patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.patch_json(&self.rest_url(path), body).await
    }

    /// DELETE request. The response body is not read.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn delete_request(&self, url: &str) -> Result<()> {
        let request = self.delete(&self.url(url)?);
        self.http.execute(request).await?;
        Ok(())
    }

    /// DELETE request to REST API.
    pub async fn rest_delete(&self, path: &str) -> Result<()> {
        self.delete_request(&self.rest_url(path)).await
    }

    // =========================================================================
    // Query Helpers
    // =========================================================================

    /// Execute a SOQL query via REST API.
    ///
    /// The text is sent as the single `q` parameter without inspection.
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let request = self.get(&self.rest_url("query")).query("q", soql);
        self.http.send_json(request).await
    }

    /// Fetch the next page of a query from its `nextRecordsUrl`.
    #[instrument(skip(self))]
    pub async fn query_more<T: DeserializeOwned>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<T>> {
        self.get_json(next_records_url).await
    }
}

/// A record with no client-side schema: field name to dynamic value.
pub type SObject = serde_json::Map<String, serde_json::Value>;

/// Result of a SOQL query.
///
/// Every field defaults when absent from the response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct QueryResult<T = SObject> {
    /// Whether all records are returned (no more pages).
    #[serde(default)]
    pub done: bool,

    /// Total number of records matching the query.
    #[serde(rename = "totalSize", default)]
    pub total_size: u64,

    /// The records of this page, in server order.
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,

    /// URL to fetch the next page of results.
    #[serde(rename = "nextRecordsUrl", default, skip_serializing_if = "Option::is_none")]
    pub next_records_url: Option<String>,
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self {
            done: false,
            total_size: 0,
            records: Vec::new(),
            next_records_url: None,
        }
    }
}
