//! # forcekit-client
//!
//! Session and HTTP plumbing for the Salesforce REST API.
//!
//! This crate provides:
//! - [`Session`], the validated `{instance_url, access_token, api_version}` triple
//! - [`HttpExecutor`], a single-attempt reqwest wrapper with compression and pooling
//! - [`SessionClient`], which stamps authentication and JSON headers on every call
//! - SOQL and URL hygiene helpers in [`security`]
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    forcekit-rest                            │
//! │  (describe, CRUD, query, record decoding)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SessionClient                            │
//! │  - Holds the Session + HTTP executor                        │
//! │  - Typed JSON methods (get_json, post_json, ...)            │
//! │  - Authorization / Accept / Content-Type / extra headers    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HttpExecutor                             │
//! │  - One attempt per call, overall timeout                    │
//! │  - Non-2xx becomes ErrorKind::Remote with the raw body      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use forcekit_client::{ApiVersion, QueryResult, Session, SessionClient};
//!
//! # async fn run() -> Result<(), forcekit_client::Error> {
//! let session = Session::new(
//!     "https://na1.salesforce.com",
//!     "00D...!AQ...",
//!     ApiVersion::default(),
//! )?;
//! let client = SessionClient::new(session)?;
//!
//! let accounts: QueryResult = client.query("select Id, Name from Account").await?;
//! println!("{} accounts", accounts.total_size);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

mod client;
mod config;
mod error;
mod request;
mod response;
mod salesforce_client;
pub mod security;
mod session;

pub use client::HttpExecutor;
pub use config::{ClientConfig, ClientConfigBuilder, CompressionConfig};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{sanitize_error_message, ApiError, Response};
pub use salesforce_client::{QueryResult, SObject, SessionClient};
pub use session::{ApiVersion, Session};

/// Default Salesforce API version.
pub const DEFAULT_API_VERSION: &str = "v62.0";

/// User-Agent string for the client.
pub const USER_AGENT: &str = concat!("forcekit/", env!("CARGO_PKG_VERSION"));

/// Overall per-call timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
