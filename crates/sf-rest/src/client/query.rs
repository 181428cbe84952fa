use tracing::instrument;

use crate::codec::{decode_query_result, Decoded, SObjectRecord};
use crate::error::Result;
use crate::query::{QueryResult, QuerySpec};

impl super::ForceClient {
    /// Execute a SOQL query and return the first page.
    ///
    /// The text is sent unchanged. Follow `next_records_url` with
    /// [`query_more`](Self::query_more) for further pages.
    ///
    /// # Security
    ///
    /// Escape user-provided values before putting them into the query:
    ///
    /// ```rust,ignore
    /// use forcekit_client::security::soql;
    ///
    /// let safe_value = soql::escape_string(user_input);
    /// let spec = QuerySpec::new(format!("SELECT Id FROM Account WHERE Name = '{}'", safe_value));
    /// ```
    #[instrument(skip(self, spec), fields(soql = %spec))]
    pub async fn query(&self, spec: &QuerySpec) -> Result<QueryResult> {
        self.client.query(spec.as_str()).await.map_err(Into::into)
    }

    /// Fetch the next page of a query from its `nextRecordsUrl`.
    #[instrument(skip(self))]
    pub async fn query_more(&self, next_records_url: &str) -> Result<QueryResult> {
        self.client
            .query_more(next_records_url)
            .await
            .map_err(Into::into)
    }

    /// Execute a query and decode its records into `T`.
    ///
    /// The raw page is returned alongside so paging fields stay available.
    pub async fn query_and_decode<T: SObjectRecord>(
        &self,
        spec: &QuerySpec,
    ) -> Result<(QueryResult, Decoded<T>)> {
        let result = self.query(spec).await?;
        let decoded = decode_query_result(&result)?;
        Ok((result, decoded))
    }

    /// Build a query selecting every field of `sobject`.
    ///
    /// Describes the object and joins its field names in server order into
    /// `select <fields> from <object> `.
    #[instrument(skip(self))]
    pub async fn build_projection_query(&self, sobject: &str) -> Result<QuerySpec> {
        let metadata = self.describe(sobject).await?;
        Ok(QuerySpec::projection(sobject, metadata.field_names()))
    }
}
