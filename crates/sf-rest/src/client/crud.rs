use forcekit_client::security::url as url_security;
use serde::Serialize;
use tracing::instrument;

use crate::error::{Error, Result};
use crate::sobject::CreateResult;

impl super::ForceClient {
    /// Create a record.
    ///
    /// The server's `{id, success, errors}` answer is returned as-is.
    #[instrument(skip(self, fields))]
    pub async fn create<T: Serialize + ?Sized>(
        &self,
        sobject: &str,
        fields: &T,
    ) -> Result<CreateResult> {
        let path = url_security::sobject_collection_path(sobject)
            .ok_or_else(|| Error::config(format!("invalid SObject name '{}'", sobject)))?;
        self.client.rest_post(&path, fields).await.map_err(Into::into)
    }

    /// Update a record. Only the given fields change.
    #[instrument(skip(self, fields))]
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        sobject: &str,
        id: &str,
        fields: &T,
    ) -> Result<()> {
        let path = record_path(sobject, id)?;
        self.client.rest_patch(&path, fields).await.map_err(Into::into)
    }

    /// Delete a record.
    #[instrument(skip(self))]
    pub async fn destroy(&self, sobject: &str, id: &str) -> Result<()> {
        let path = record_path(sobject, id)?;
        self.client.rest_delete(&path).await.map_err(Into::into)
    }
}

fn record_path(sobject: &str, id: &str) -> Result<String> {
    url_security::sobject_path(sobject, id).ok_or_else(|| {
        Error::config(format!(
            "invalid SObject name '{}' or record id '{}'",
            sobject, id
        ))
    })
}
