//! # forcekit
//!
//! A schema-driven Salesforce REST client for Rust.
//!
//! It authenticates with an access token or the OAuth 2.0 username-password
//! grant, describes objects, builds projection queries from their field
//! lists, decodes query records into plain structs and performs
//! single-record creates, updates and deletes.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets) are redacted in Debug output
//! - Tracing/logging skips credential parameters
//! - Error messages sanitize any credential data
//!
//! ## Crates
//!
//! - **forcekit-client** - Session, HTTP executor, typed JSON calls, security helpers
//! - **forcekit-auth** - Credentials and the OAuth 2.0 token exchange
//! - **forcekit-rest** - Describe, CRUD, Query and record decoding
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use forcekit::{Credentials, ForceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // SF_ACCESS_TOKEN + SF_INSTANCE_URL, or the four password grant values
//!     let client = ForceClient::builder()
//!         .credentials(Credentials::from_env()?)
//!         .build()
//!         .await?;
//!
//!     let spec = client.build_projection_query("Account").await?;
//!     let page = client.query(&spec).await?;
//!
//!     for account in &page.records {
//!         println!("{}", account["Name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use forcekit_auth as auth;
#[cfg(feature = "client")]
pub use forcekit_client as client;
#[cfg(feature = "rest")]
pub use forcekit_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use forcekit_auth::{Credentials, PasswordCredentials};
#[cfg(feature = "client")]
pub use forcekit_client::{ApiVersion, ClientConfig, Session};
#[cfg(feature = "rest")]
pub use forcekit_rest::{sobject_record, Error, ForceClient, ForceClientBuilder, QuerySpec};
