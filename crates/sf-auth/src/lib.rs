//! # forcekit-auth
//!
//! Authentication for the Salesforce REST API.
//!
//! ## Security
//!
//! - Tokens, secrets and passwords are redacted in Debug output
//! - Tracing skips credential parameters
//! - Credentials are validated before any request is sent
//!
//! ## Supported Authentication Methods
//!
//! - **Bearer token** - a pre-obtained access token plus its instance URL
//! - **OAuth 2.0 username-password grant** - one POST to the token endpoint
//!
//! ## Example
//!
//! ```rust,no_run
//! use forcekit_auth::{authenticate, Credentials, DEFAULT_LOGIN_URL};
//! use forcekit_client::{ApiVersion, ClientConfig};
//!
//! # async fn run() -> Result<(), forcekit_auth::Error> {
//! let credentials = Credentials::from_env()?;
//! let session = authenticate(
//!     &credentials,
//!     DEFAULT_LOGIN_URL,
//!     ApiVersion::default(),
//!     &ClientConfig::default(),
//! )
//! .await?;
//! println!("connected to {}", session.instance_url());
//! # Ok(())
//! # }
//! ```

mod authenticator;
mod credentials;
mod error;
mod oauth;

pub use authenticator::authenticate;
pub use credentials::{Credentials, PasswordCredentials};
pub use error::{Error, ErrorKind, Result};
pub use oauth::{OAuthClient, TokenErrorCode, TokenResponse};

/// Default Salesforce login URL for production.
pub const DEFAULT_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";
