//! Identifier and literal hygiene for values placed into URLs and SOQL.
//!
//! Object names and record ids end up as path segments of REST URLs, so they
//! are checked before any request is built. Values interpolated into SOQL
//! string literals go through [`soql::escape_string`].
//!
//! ```rust
//! use forcekit_client::security::{soql, url};
//!
//! let name = soql::escape_string("O'Brien");
//! let text = format!("select Id from Contact where LastName = '{}'", name);
//! assert_eq!(text, "select Id from Contact where LastName = 'O\\'Brien'");
//!
//! assert_eq!(
//!     url::sobject_path("Account", "001000000000001AAA").as_deref(),
//!     Some("sobjects/Account/001000000000001AAA")
//! );
//! ```

/// SOQL literal escaping and identifier checks.
pub mod soql {
    /// Escape a value for use inside a single-quoted SOQL string literal.
    ///
    /// Quotes, backslashes and the control characters `\n`, `\r`, `\t` are
    /// backslash-escaped; everything else is passed through.
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Escape a value for a `LIKE` pattern, so `%` and `_` match literally.
    #[must_use]
    pub fn escape_like(value: &str) -> String {
        escape_string(value)
            .replace('%', "\\%")
            .replace('_', "\\_")
    }

    /// Whether `name` is an API name: an ASCII letter followed by ASCII
    /// letters, digits or underscores.
    ///
    /// Covers standard names (`Account`), custom names (`Invoice__c`) and
    /// namespaced names (`ns__Invoice__c`).
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            }
            _ => false,
        }
    }

    /// Object names follow the same rules as field names.
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        is_safe_field_name(name)
    }
}

/// URL path helpers.
pub mod url {
    use super::soql::is_safe_sobject_name;

    /// Percent-encode a value for use in a path or query string.
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Whether `id` has the shape of a record id: 15 or 18 ASCII
    /// alphanumerics.
    #[must_use]
    pub fn is_valid_salesforce_id(id: &str) -> bool {
        let len = id.len();
        (len == 15 || len == 18) && id.chars().all(|c| c.is_ascii_alphanumeric())
    }

    /// Whether `segment` can be placed into a URL path unchanged.
    ///
    /// Accepts ASCII alphanumerics plus `_`, `-` and `.`, but never a segment
    /// made only of dots.
    #[must_use]
    pub fn is_safe_path_segment(segment: &str) -> bool {
        !segment.is_empty()
            && !segment.chars().all(|c| c == '.')
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    }

    /// `sobjects/<object>` when the object name is safe.
    #[must_use]
    pub fn sobject_collection_path(sobject: &str) -> Option<String> {
        is_safe_sobject_name(sobject).then(|| format!("sobjects/{}", sobject))
    }

    /// `sobjects/<object>/<id>` when both parts are safe.
    ///
    /// The id may be a record id or any other safe segment, so external-id
    /// style values like `ext-42` are accepted too.
    #[must_use]
    pub fn sobject_path(sobject: &str, id: &str) -> Option<String> {
        if !is_valid_salesforce_id(id) && !is_safe_path_segment(id) {
            return None;
        }
        sobject_collection_path(sobject).map(|base| format!("{}/{}", base, id))
    }
}
