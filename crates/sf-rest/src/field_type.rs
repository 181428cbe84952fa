//! Declared field types and their host-language categories.

use serde::{Deserialize, Serialize};

/// A field's declared data type as reported by describe.
///
/// Types without a named variant are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum FieldDataType {
    Address,
    AnyType,
    Calculated,
    Combobox,
    Currency,
    DataCategoryGroupReference,
    Email,
    EncryptedString,
    Id,
    JunctionIdList,
    Location,
    MasterRecord,
    MultiPicklist,
    Percent,
    Phone,
    Picklist,
    Reference,
    TextArea,
    Url,
    Other(String),
}

/// How a field's values are represented on this side of the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    /// Text.
    String,
    /// An arbitrary-precision number (currency, percent).
    Numeric,
    /// Any JSON value.
    Any,
    /// A list of strings.
    StringArray,
}

impl FieldCategory {
    /// The Rust type a decoded value of this category maps to.
    pub fn rust_type(&self) -> &'static str {
        match self {
            FieldCategory::String => "String",
            FieldCategory::Numeric => "serde_json::Number",
            FieldCategory::Any => "serde_json::Value",
            FieldCategory::StringArray => "Vec<String>",
        }
    }
}

impl FieldDataType {
    /// The type name as it appears in describe output.
    pub fn as_str(&self) -> &str {
        match self {
            FieldDataType::Address => "address",
            FieldDataType::AnyType => "anyType",
            FieldDataType::Calculated => "calculated",
            FieldDataType::Combobox => "combobox",
            FieldDataType::Currency => "currency",
            FieldDataType::DataCategoryGroupReference => "DataCategoryGroupReference",
            FieldDataType::Email => "email",
            FieldDataType::EncryptedString => "encryptedstring",
            FieldDataType::Id => "ID",
            FieldDataType::JunctionIdList => "JunctionIdList",
            FieldDataType::Location => "location",
            FieldDataType::MasterRecord => "masterrecord",
            FieldDataType::MultiPicklist => "multipicklist",
            FieldDataType::Percent => "percent",
            FieldDataType::Phone => "phone",
            FieldDataType::Picklist => "picklist",
            FieldDataType::Reference => "reference",
            FieldDataType::TextArea => "textarea",
            FieldDataType::Url => "url",
            FieldDataType::Other(name) => name,
        }
    }

    /// Map the declared type onto its host category.
    ///
    /// `currency` and `percent` are numeric, `anyType` is any value and
    /// `JunctionIdList` is a string list. Every other type, named or not,
    /// is a string.
    pub fn host_category(&self) -> FieldCategory {
        match self {
            FieldDataType::Currency | FieldDataType::Percent => FieldCategory::Numeric,
            FieldDataType::AnyType => FieldCategory::Any,
            FieldDataType::JunctionIdList => FieldCategory::StringArray,
            _ => FieldCategory::String,
        }
    }
}

impl Default for FieldDataType {
    fn default() -> Self {
        FieldDataType::Other(String::new())
    }
}

impl From<&str> for FieldDataType {
    fn from(name: &str) -> Self {
        match name {
            "address" => FieldDataType::Address,
            "anyType" => FieldDataType::AnyType,
            "calculated" => FieldDataType::Calculated,
            "combobox" => FieldDataType::Combobox,
            "currency" => FieldDataType::Currency,
            "DataCategoryGroupReference" => FieldDataType::DataCategoryGroupReference,
            "email" => FieldDataType::Email,
            "encryptedstring" => FieldDataType::EncryptedString,
            "ID" => FieldDataType::Id,
            "JunctionIdList" => FieldDataType::JunctionIdList,
            "location" => FieldDataType::Location,
            "masterrecord" => FieldDataType::MasterRecord,
            "multipicklist" => FieldDataType::MultiPicklist,
            "percent" => FieldDataType::Percent,
            "phone" => FieldDataType::Phone,
            "picklist" => FieldDataType::Picklist,
            "reference" => FieldDataType::Reference,
            "textarea" => FieldDataType::TextArea,
            "url" => FieldDataType::Url,
            other => FieldDataType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldDataType {
    fn from(name: String) -> Self {
        match FieldDataType::from(name.as_str()) {
            FieldDataType::Other(_) => FieldDataType::Other(name),
            known => known,
        }
    }
}

impl From<FieldDataType> for String {
    fn from(field_type: FieldDataType) -> Self {
        match field_type {
            FieldDataType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for FieldDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
