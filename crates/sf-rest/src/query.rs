//! SOQL query text.

use std::fmt;

pub use forcekit_client::{QueryResult, SObject};

/// A SOQL statement ready to send.
///
/// The text is sent as-is; nothing here validates or escapes it. Quote any
/// user-provided values with [`forcekit_client::security::soql::escape_string`]
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuerySpec {
    soql: String,
}

impl QuerySpec {
    pub fn new(soql: impl Into<String>) -> Self {
        Self { soql: soql.into() }
    }

    /// Projection of `fields` from `object`, in the given order.
    ///
    /// Produces `select <f1>,<f2>,... from <object> ` with the trailing space.
    pub fn projection<I, S>(object: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = fields
            .into_iter()
            .map(|field| field.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        Self::new(format!("select {} from {} ", joined, object))
    }

    pub fn as_str(&self) -> &str {
        &self.soql
    }

    pub fn into_string(self) -> String {
        self.soql
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.soql)
    }
}

impl From<&str> for QuerySpec {
    fn from(soql: &str) -> Self {
        Self::new(soql)
    }
}

impl From<String> for QuerySpec {
    fn from(soql: String) -> Self {
        Self::new(soql)
    }
}
