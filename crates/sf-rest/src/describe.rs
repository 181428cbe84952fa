//! Describe types.
//!
//! These model the commonly used subset of the describe result. Unknown keys
//! are ignored and every key may be absent, since the server omits keys that
//! do not apply to an object or an API version.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::field_type::{FieldCategory, FieldDataType};

// ============================================================================
// SObject Metadata
// ============================================================================

/// Describe result for one SObject.
///
/// `fields` keeps the server's order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SObjectMetadata {
    // === Identity ===
    #[serde(default)]
    pub name: String,
    pub label: Option<String>,
    #[serde(rename = "labelPlural")]
    pub label_plural: Option<String>,
    #[serde(rename = "keyPrefix")]
    pub key_prefix: Option<String>,
    pub custom: Option<bool>,
    #[serde(rename = "customSetting")]
    pub custom_setting: Option<bool>,
    #[serde(rename = "associateEntityType")]
    pub associate_entity_type: Option<String>,
    #[serde(rename = "associateParentEntity")]
    pub associate_parent_entity: Option<String>,

    // === Capabilities (CRUD) ===
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub deletable: bool,
    #[serde(default)]
    pub queryable: bool,
    #[serde(default)]
    pub retrieveable: bool,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub updateable: bool,
    pub undeletable: Option<bool>,
    pub mergeable: Option<bool>,
    pub replicateable: Option<bool>,
    pub triggerable: Option<bool>,

    // === Layout & UI ===
    pub activateable: Option<bool>,
    #[serde(rename = "compactLayoutable")]
    pub compact_layoutable: Option<bool>,
    pub layoutable: Option<bool>,
    #[serde(rename = "searchLayoutable")]
    pub search_layoutable: Option<bool>,
    #[serde(rename = "feedEnabled")]
    pub feed_enabled: Option<bool>,
    #[serde(rename = "urlDetail")]
    pub url_detail: Option<String>,
    #[serde(rename = "urlEdit")]
    pub url_edit: Option<String>,
    #[serde(rename = "urlNew")]
    pub url_new: Option<String>,

    // === Fields & Relationships ===
    #[serde(default)]
    pub fields: Vec<FieldMetadata>,
    #[serde(rename = "childRelationships", default)]
    pub child_relationships: Vec<ChildRelationship>,

    // === Record Types & Layouts ===
    #[serde(rename = "recordTypeInfos", default)]
    pub record_type_infos: Vec<RecordTypeInfo>,
    #[serde(rename = "namedLayoutInfos", default)]
    pub named_layout_infos: Vec<NamedLayoutInfo>,

    // === Subtypes ===
    #[serde(rename = "hasSubtypes")]
    pub has_subtypes: Option<bool>,
    #[serde(rename = "isSubtype")]
    pub is_subtype: Option<bool>,
    #[serde(rename = "idEnabled")]
    pub id_enabled: Option<bool>,

    // === API Metadata ===
    #[serde(rename = "deprecatedAndHidden")]
    pub deprecated_and_hidden: Option<bool>,
    #[serde(rename = "networkScopeFieldName")]
    pub network_scope_field_name: Option<String>,
    #[serde(default)]
    pub urls: HashMap<String, String>,
    #[serde(rename = "supportedScopes", default)]
    pub supported_scopes: Vec<ScopeInfo>,
    #[serde(rename = "actionOverrides", default)]
    pub action_overrides: Vec<ActionOverride>,
}

impl SObjectMetadata {
    /// Field names in server order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Field names in server order, joined with `,` and no spaces.
    pub fn field_names_string(&self) -> String {
        self.field_names().join(",")
    }

    /// Look up a field by its exact API name.
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Each field name paired with its host category, in server order.
    pub fn field_categories(&self) -> Vec<(&str, FieldCategory)> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.field_type.host_category()))
            .collect()
    }
}

/// Child relationship metadata for an SObject.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ChildRelationship {
    #[serde(rename = "childSObject")]
    pub child_sobject: Option<String>,
    pub field: Option<String>,
    #[serde(rename = "relationshipName")]
    pub relationship_name: Option<String>,
    #[serde(rename = "cascadeDelete")]
    pub cascade_delete: Option<bool>,
    #[serde(rename = "restrictedDelete")]
    pub restricted_delete: Option<bool>,
    #[serde(rename = "deprecatedAndHidden")]
    pub deprecated_and_hidden: Option<bool>,
    #[serde(rename = "junctionIdListNames", default)]
    pub junction_id_list_names: Vec<String>,
    #[serde(rename = "junctionReferenceTo", default)]
    pub junction_reference_to: Vec<String>,
}

/// Record type information for an SObject.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RecordTypeInfo {
    pub name: Option<String>,
    #[serde(rename = "recordTypeId")]
    pub record_type_id: Option<String>,
    #[serde(rename = "developerName")]
    pub developer_name: Option<String>,
    pub available: Option<bool>,
    #[serde(rename = "defaultRecordTypeMapping")]
    pub default_record_type_mapping: Option<bool>,
    pub master: Option<bool>,
}

/// Named layout info for an SObject.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NamedLayoutInfo {
    pub name: Option<String>,
}

/// A list-view scope such as "My Accounts".
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScopeInfo {
    pub name: Option<String>,
    pub label: Option<String>,
}

/// Action override for UI customization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ActionOverride {
    #[serde(rename = "formFactor")]
    pub form_factor: Option<String>,
    #[serde(rename = "isAvailableInTouch")]
    pub is_available_in_touch: Option<bool>,
    pub name: Option<String>,
    #[serde(rename = "pageId")]
    pub page_id: Option<String>,
    pub url: Option<String>,
}

// ============================================================================
// Field Metadata
// ============================================================================

/// Describe result for one field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FieldMetadata {
    // === Identity ===
    #[serde(default)]
    pub name: String,
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: FieldDataType,
    #[serde(rename = "soapType")]
    pub soap_type: Option<String>,
    pub custom: Option<bool>,

    // === Size & Precision ===
    pub length: Option<i32>,
    #[serde(rename = "byteLength")]
    pub byte_length: Option<i32>,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
    pub digits: Option<i32>,

    // === Capabilities ===
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub nillable: bool,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub groupable: bool,
    pub aggregatable: Option<bool>,
    #[serde(default)]
    pub unique: bool,
    pub permissionable: Option<bool>,

    // === Field Characteristics ===
    #[serde(rename = "externalId", default)]
    pub external_id: bool,
    #[serde(rename = "idLookup", default)]
    pub id_lookup: bool,
    #[serde(default)]
    pub calculated: bool,
    #[serde(rename = "calculatedFormula")]
    pub calculated_formula: Option<String>,
    #[serde(rename = "autoNumber", default)]
    pub auto_number: bool,
    #[serde(default)]
    pub encrypted: bool,
    #[serde(rename = "nameField")]
    pub name_field: Option<bool>,
    #[serde(rename = "namePointing")]
    pub name_pointing: Option<bool>,
    #[serde(rename = "caseSensitive")]
    pub case_sensitive: Option<bool>,
    #[serde(rename = "htmlFormatted")]
    pub html_formatted: Option<bool>,
    #[serde(rename = "highScaleNumber")]
    pub high_scale_number: Option<bool>,
    #[serde(rename = "extraTypeInfo")]
    pub extra_type_info: Option<String>,

    // === Defaults ===
    #[serde(rename = "defaultValue")]
    pub default_value: Option<serde_json::Value>,
    #[serde(rename = "defaultValueFormula")]
    pub default_value_formula: Option<String>,
    #[serde(rename = "defaultedOnCreate")]
    pub defaulted_on_create: Option<bool>,

    // === Relationships ===
    #[serde(rename = "referenceTo", default)]
    pub reference_to: Option<Vec<String>>,
    #[serde(rename = "relationshipName")]
    pub relationship_name: Option<String>,
    #[serde(rename = "relationshipOrder")]
    pub relationship_order: Option<i32>,
    #[serde(rename = "referenceTargetField")]
    pub reference_target_field: Option<String>,
    #[serde(rename = "cascadeDelete")]
    pub cascade_delete: Option<bool>,
    #[serde(rename = "restrictedDelete")]
    pub restricted_delete: Option<bool>,
    #[serde(rename = "writeRequiresMasterRead")]
    pub write_requires_master_read: Option<bool>,

    // === Picklist ===
    #[serde(rename = "picklistValues", default)]
    pub picklist_values: Option<Vec<PicklistValue>>,
    #[serde(rename = "dependentPicklist")]
    pub dependent_picklist: Option<bool>,
    #[serde(rename = "controllerName")]
    pub controller_name: Option<String>,
    #[serde(rename = "restrictedPicklist")]
    pub restricted_picklist: Option<bool>,

    // === Lookup Filters ===
    #[serde(rename = "filteredLookupInfo")]
    pub filtered_lookup_info: Option<FilteredLookupInfo>,

    // === Masked Fields ===
    pub mask: Option<String>,
    #[serde(rename = "maskType")]
    pub mask_type: Option<String>,

    // === API Metadata ===
    #[serde(rename = "deprecatedAndHidden")]
    pub deprecated_and_hidden: Option<bool>,
    #[serde(rename = "inlineHelpText")]
    pub inline_help_text: Option<String>,
}

/// Filtered lookup info for lookup fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FilteredLookupInfo {
    #[serde(rename = "controllingFields", default)]
    pub controlling_fields: Vec<String>,
    #[serde(default)]
    pub dependent: bool,
    #[serde(rename = "optionalFilter", default)]
    pub optional_filter: bool,
}

/// Picklist value for picklist fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PicklistValue {
    pub value: Option<String>,
    pub label: Option<String>,
    pub active: Option<bool>,
    #[serde(rename = "defaultValue")]
    pub default_value: Option<bool>,
    #[serde(rename = "validFor")]
    pub valid_for: Option<String>,
}
