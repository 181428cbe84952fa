//! Salesforce REST API client.
//!
//! This client wraps [`SessionClient`] from forcekit-client and adds object
//! describe, single-record writes and SOQL queries on top of it.

use forcekit_client::{ClientConfig, Session, SessionClient};

use crate::builder::ForceClientBuilder;
use crate::error::Result;

mod crud;
mod describe;
mod query;

/// Authenticated Salesforce REST API client.
///
/// Every operation is exactly one request. The client never changes after
/// construction and clones share one connection pool, so it can be used
/// from many tasks at once.
///
/// # Example
///
/// ```rust,ignore
/// use forcekit_rest::{ForceClient, QuerySpec};
/// use serde_json::json;
///
/// let client = ForceClient::builder()
///     .instance_url("https://myorg.my.salesforce.com")
///     .access_token("00Dxx!token")
///     .build()
///     .await?;
///
/// let created = client.create("Account", &json!({"Name": "Acme"})).await?;
/// client.update("Account", &created.id, &json!({"Name": "Acme Corp"})).await?;
/// let page = client.query(&QuerySpec::new("SELECT Id, Name FROM Account")).await?;
/// client.destroy("Account", &created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ForceClient {
    client: SessionClient,
}

impl ForceClient {
    /// Start configuring a client.
    pub fn builder() -> ForceClientBuilder {
        ForceClientBuilder::new()
    }

    /// Wrap an existing authenticated client.
    pub fn new(client: SessionClient) -> Self {
        Self { client }
    }

    /// Create a client for an already established session.
    pub fn from_session(session: Session, config: ClientConfig) -> Result<Self> {
        Ok(Self::new(SessionClient::with_config(session, config)?))
    }

    /// Get the underlying SessionClient.
    pub fn inner(&self) -> &SessionClient {
        &self.client
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        self.client.instance_url()
    }

    /// Get the API version, such as `v62.0`.
    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }
}

#[cfg(test)]
pub(crate) fn test_client(instance_url: &str) -> ForceClient {
    let session = Session::new(
        instance_url,
        "test-token",
        forcekit_client::ApiVersion::default(),
    )
    .unwrap();
    ForceClient::from_session(session, ClientConfig::default()).unwrap()
}
