//! # forcekit-rest
//!
//! Salesforce REST API client: describe, single-record CRUD, SOQL queries
//! and decoding of dynamic records into typed structs.
//!
//! ## Features
//!
//! - **Authentication** - [`ForceClient::builder`] takes an access token or
//!   username-password credentials and validates every option up front
//! - **Describe** - Field metadata for any SObject, in server order
//! - **CRUD** - Create, update and delete individual records
//! - **SOQL Query** - Raw queries, continuation pages and projection queries
//! - **Record decoding** - [`codec`] fills plain structs from query records
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcekit_rest::{sobject_record, ForceClient, QuerySpec};
//!
//! #[derive(Debug, Default)]
//! struct Account {
//!     id: String,
//!     name: String,
//! }
//! sobject_record!(Account { id => "Id", name => "Name" });
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcekit_rest::Error> {
//!     let client = ForceClient::builder()
//!         .instance_url("https://myorg.my.salesforce.com")
//!         .access_token("access_token_here")
//!         .build()
//!         .await?;
//!
//!     // Query every field of Account
//!     let spec = client.build_projection_query("Account").await?;
//!     let (_page, accounts) = client.query_and_decode::<Account>(&spec).await?;
//!     println!("{:?}", accounts.into_vec());
//!
//!     // Create
//!     let created = client
//!         .create("Account", &serde_json::json!({"Name": "New Account"}))
//!         .await?;
//!
//!     // Update
//!     client
//!         .update("Account", &created.id, &serde_json::json!({"Name": "Updated"}))
//!         .await?;
//!
//!     // Delete
//!     client.destroy("Account", &created.id).await?;
//!
//!     Ok(())
//! }
//! ```

mod builder;
mod client;
pub mod codec;
mod describe;
mod error;
mod field_type;
mod query;
mod sobject;

// Main client
pub use builder::ForceClientBuilder;
pub use client::ForceClient;

// Record decoding
pub use codec::{
    decode_many, decode_one, decode_query_result, DecodeError, Decoded, FromFieldValue, Nested,
    SObjectRecord,
};

// Describe types
pub use describe::{
    ActionOverride, ChildRelationship, FieldMetadata, FilteredLookupInfo, NamedLayoutInfo,
    PicklistValue, RecordTypeInfo, SObjectMetadata, ScopeInfo,
};
pub use field_type::{FieldCategory, FieldDataType};

// Error types
pub use error::{Error, ErrorKind, Result};

// Query types
pub use query::{QueryResult, QuerySpec, SObject};

// SObject CRUD types
pub use sobject::{CreateResult, SalesforceError};

// Re-export lower-layer types that users might need
pub use forcekit_auth::{Credentials, PasswordCredentials, TokenErrorCode};
pub use forcekit_client::{ApiVersion, ClientConfig, ClientConfigBuilder, Session};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}
