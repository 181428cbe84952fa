use forcekit_client::security::soql;
use tracing::instrument;

use crate::describe::SObjectMetadata;
use crate::error::{Error, ErrorKind, Result};

impl super::ForceClient {
    /// Describe an SObject.
    ///
    /// Fetches fresh metadata on every call. A 404 means the object does not
    /// exist in the org and is reported as [`ErrorKind::NotFound`].
    #[instrument(skip(self))]
    pub async fn describe(&self, sobject: &str) -> Result<SObjectMetadata> {
        if !soql::is_safe_sobject_name(sobject) {
            return Err(Error::config(format!("invalid SObject name '{}'", sobject)));
        }
        let path = format!("sobjects/{}/describe", sobject);

        match self.client.rest_get(&path).await {
            Ok(metadata) => Ok(metadata),
            Err(err) if err.status() == Some(404) => Err(Error::with_source(
                ErrorKind::NotFound(format!("SObject '{}'", sobject)),
                err,
            )),
            Err(err) => Err(err.into()),
        }
    }
}
