//! Decoding dynamic records into caller-defined structs.
//!
//! A target type implements [`SObjectRecord`]: it starts from `Default`,
//! names the record fields it wants, and assigns each one from its JSON
//! value. The [`sobject_record!`](crate::sobject_record) macro writes the
//! impl for plain structs.
//!
//! Matching rules:
//! - names match exactly, case included
//! - a field missing from the record keeps its default
//! - record keys the target does not name are ignored
//! - `null` leaves a plain field at its default and sets an `Option` field to `None`
//! - a value of the wrong JSON kind is a [`DecodeError`]
//!
//! ```rust
//! use forcekit_rest::codec::{decode_one, Nested};
//! use forcekit_rest::{sobject_record, SObject};
//!
//! #[derive(Debug, Default)]
//! struct Owner {
//!     name: String,
//! }
//! sobject_record!(Owner { name => "Name" });
//!
//! #[derive(Debug, Default)]
//! struct Account {
//!     id: String,
//!     employees: Option<i64>,
//!     owner: Nested<Owner>,
//! }
//! sobject_record!(Account {
//!     id => "Id",
//!     employees => "NumberOfEmployees",
//!     owner => "Owner",
//! });
//!
//! let record: SObject = serde_json::from_str(
//!     r#"{"Id": "001", "NumberOfEmployees": null, "Owner": {"Name": "Ada"}}"#,
//! ).unwrap();
//! let account: Account = decode_one(&record).unwrap();
//! assert_eq!(account.id, "001");
//! assert_eq!(account.employees, None);
//! assert_eq!(account.owner.name, "Ada");
//! ```

use serde_json::{Number, Value};

use crate::query::{QueryResult, SObject};

/// A field value had the wrong JSON kind for its target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot decode field '{field}': expected {expected}, found {found}")]
pub struct DecodeError {
    /// Field path, with nested fields joined by `.` and list items as `[i]`.
    pub field: String,
    /// What the target type accepts.
    pub expected: &'static str,
    /// The JSON kind that was found.
    pub found: &'static str,
}

impl DecodeError {
    pub fn new(field: impl Into<String>, expected: &'static str, value: &Value) -> Self {
        Self {
            field: field.into(),
            expected,
            found: json_kind(value),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "fractional number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A struct that can be filled from a record.
pub trait SObjectRecord: Default {
    /// Record field names this type reads.
    fn field_names() -> &'static [&'static str];

    /// Assign one record field. Names not in [`field_names`](Self::field_names)
    /// are ignored.
    fn assign(&mut self, name: &str, value: &Value) -> Result<(), DecodeError>;
}

/// Conversion from one JSON field value.
///
/// `Ok(None)` means the value was `null` and the target keeps its default.
pub trait FromFieldValue: Sized {
    /// Name of the accepted kind, used in [`DecodeError`].
    const EXPECTED: &'static str;

    fn from_field_value(field: &str, value: &Value) -> Result<Option<Self>, DecodeError>;
}

/// Assign `value` into `slot` unless it is `null`. Used by
/// [`sobject_record!`](crate::sobject_record).
pub fn assign_field<T: FromFieldValue>(
    slot: &mut T,
    field: &str,
    value: &Value,
) -> Result<(), DecodeError> {
    if let Some(decoded) = T::from_field_value(field, value)? {
        *slot = decoded;
    }
    Ok(())
}

/// Decode one record.
pub fn decode_one<T: SObjectRecord>(record: &SObject) -> Result<T, DecodeError> {
    let mut target = T::default();
    for name in T::field_names() {
        if let Some(value) = record.get(*name) {
            target.assign(name, value)?;
        }
    }
    Ok(target)
}

/// Decode records in order. An empty slice gives an empty `Vec`.
pub fn decode_many<T: SObjectRecord>(records: &[SObject]) -> Result<Vec<T>, DecodeError> {
    records.iter().map(decode_one).collect()
}

/// Outcome of [`decode_query_result`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// The result held exactly one record.
    One(T),
    /// The result held zero or several records.
    Many(Vec<T>),
}

impl<T> Decoded<T> {
    /// Flatten into a list regardless of cardinality.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Decoded::One(item) => vec![item],
            Decoded::Many(items) => items,
        }
    }

    /// The single record, if there was exactly one.
    pub fn into_one(self) -> Option<T> {
        match self {
            Decoded::One(item) => Some(item),
            Decoded::Many(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Decoded::One(_) => 1,
            Decoded::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode a query page, branching on how many records it holds.
///
/// Exactly one record yields [`Decoded::One`]; any other count yields
/// [`Decoded::Many`].
pub fn decode_query_result<T: SObjectRecord>(
    result: &QueryResult,
) -> Result<Decoded<T>, DecodeError> {
    match result.records.as_slice() {
        [single] => decode_one(single).map(Decoded::One),
        records => decode_many(records).map(Decoded::Many),
    }
}

/// A nested record, such as a parent relationship in a query result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nested<T>(pub T);

impl<T> Nested<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Nested<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: SObjectRecord> FromFieldValue for Nested<T> {
    const EXPECTED: &'static str = "object";

    fn from_field_value(field: &str, value: &Value) -> Result<Option<Self>, DecodeError> {
        match value {
            Value::Null => Ok(None),
            Value::Object(record) => decode_one(record).map(|inner| Some(Nested(inner))).map_err(
                |mut err| {
                    err.field = format!("{}.{}", field, err.field);
                    err
                },
            ),
            other => Err(DecodeError::new(field, Self::EXPECTED, other)),
        }
    }
}

// ============================================================================
// Scalar conversions
// ============================================================================

impl FromFieldValue for String {
    const EXPECTED: &'static str = "string";

    fn from_field_value(field: &str, value: &Value) -> Result<Option<Self>, DecodeError> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            other => Err(DecodeError::new(field, Self::EXPECTED, other)),
        }
    }
}

impl FromFieldValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_field_value(field: &str, value: &Value) -> Result<Option<Self>, DecodeError> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            other => Err(DecodeError::new(field, Self::EXPECTED, other)),
        }
    }
}

macro_rules! impl_integer {
    ($via:ident => $($ty:ty),*) => {
        $(
            impl FromFieldValue for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_field_value(field: &str, value: &Value) -> Result<Option<Self>, DecodeError> {
                    match value {
                        Value::Null => Ok(None),
                        Value::Number(n) => n
                            .$via()
                            .and_then(|v| <$ty>::try_from(v).ok())
                            .map(Some)
                            .ok_or_else(|| DecodeError::new(field, Self::EXPECTED, value)),
                        other => Err(DecodeError::new(field, Self::EXPECTED, other)),
                    }
                }
            }
        )*
    };
}

impl_integer!(as_i64 => i8, i16, i32, i64, isize);
impl_integer!(as_u64 => u8, u16, u32, u64, usize);

impl FromFieldValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_field_value(field: &str, value: &Value) -> Result<Option<Self>, DecodeError> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| DecodeError::new(field, Self::EXPECTED, value)),
            other => Err(DecodeError::new(field, Self::EXPECTED, other)),
        }
    }
}

impl FromFieldValue for f32 {
    const EXPECTED: &'static str = "number";

    fn from_field_value(field: &str, value: &Value) -> Result<Option<Self>, DecodeError> {
        Ok(f64::from_field_value(field, value)?.map(|v| v as f32))
    }
}

impl FromFieldValue for Number {
    const EXPECTED: &'static str = "number";

    fn from_field_value(field: &str, value: &Value) -> Result<Option<Self>, DecodeError> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(Some(n.clone())),
            other => Err(DecodeError::new(field, Self::EXPECTED, other)),
        }
    }
}

impl FromFieldValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_field_value(_field: &str, value: &Value) -> Result<Option<Self>, DecodeError> {
        Ok(Some(value.clone()))
    }
}

impl FromFieldValue for SObject {
    const EXPECTED: &'static str = "object";

    fn from_field_value(field: &str, value: &Value) -> Result<Option<Self>, DecodeError> {
        match value {
            Value::Null => Ok(None),
            Value::Object(map) => Ok(Some(map.clone())),
            other => Err(DecodeError::new(field, Self::EXPECTED, other)),
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_field_value(field: &str, value: &Value) -> Result<Option<Self>, DecodeError> {
        if value.is_null() {
            return Ok(Some(None));
        }
        Ok(T::from_field_value(field, value)?.map(Some))
    }
}

impl<T: FromFieldValue> FromFieldValue for Vec<T> {
    const EXPECTED: &'static str = "array";

    fn from_field_value(field: &str, value: &Value) -> Result<Option<Self>, DecodeError> {
        match value {
            Value::Null => Ok(None),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let path = format!("{}[{}]", field, i);
                    T::from_field_value(&path, item)?
                        .ok_or_else(|| DecodeError::new(path, T::EXPECTED, item))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            other => Err(DecodeError::new(field, Self::EXPECTED, other)),
        }
    }
}

/// Implement [`SObjectRecord`](crate::codec::SObjectRecord) for a struct
/// that implements `Default`.
///
/// Each entry maps a struct field to the record field name it is read from.
///
/// ```rust
/// use forcekit_rest::sobject_record;
///
/// #[derive(Default)]
/// struct Contact {
///     id: String,
///     email: Option<String>,
/// }
///
/// sobject_record!(Contact {
///     id => "Id",
///     email => "Email",
/// });
/// ```
#[macro_export]
macro_rules! sobject_record {
    ($ty:ty { $($field:ident => $name:literal),* $(,)? }) => {
        impl $crate::codec::SObjectRecord for $ty {
            fn field_names() -> &'static [&'static str] {
                &[$($name),*]
            }

            fn assign(
                &mut self,
                name: &str,
                value: &$crate::__private::Value,
            ) -> ::std::result::Result<(), $crate::codec::DecodeError> {
                match name {
                    $($name => $crate::codec::assign_field(&mut self.$field, name, value),)*
                    _ => Ok(()),
                }
            }
        }
    };
}
