//! SObject write results.

use serde::{Deserialize, Serialize};

/// Result of a create operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CreateResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<SalesforceError>,
}

/// Salesforce error in operation results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SalesforceError {
    #[serde(rename = "statusCode", default)]
    pub status_code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}
