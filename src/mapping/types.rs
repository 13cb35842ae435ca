//! Field mapping types and the table-driven decoder

use crate::coerce::{normalize_keys_deep, parse_flag, parse_timestamp, Timestamp};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

/// How a mapped wire value is coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Passed through unchanged
    #[default]
    Plain,
    /// Nested object/array whose keys are converted to snake_case
    Dict,
    /// `YYYY-MM-DD HH:MM:SS` string
    DateTime,
    /// `"Y"`/`"N"` string
    Flag,
}

/// One row of a mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name in the API payload
    pub wire: &'static str,
    /// Attribute name on the entity
    pub local: &'static str,
    /// Coercion applied to the value
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Create a table row
    pub const fn new(wire: &'static str, local: &'static str, kind: FieldKind) -> Self {
        Self { wire, local, kind }
    }
}

/// Mapping table for one entity type
///
/// Every marker set (`dict_fields`, `datetime_fields`, `bool_fields`) is
/// derived from the rows, so it is always a subset of the mapped wire keys.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    /// Entity name, used in error messages
    pub entity: &'static str,
    /// Table rows
    pub fields: &'static [FieldSpec],
}

impl FieldMapping {
    /// Create a mapping table
    pub const fn new(entity: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { entity, fields }
    }

    /// Look up the row for a wire field
    pub fn get(&self, wire: &str) -> Option<&'static FieldSpec> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().find(|spec| spec.wire == wire)
    }

    /// Local attribute name for a wire field
    pub fn local_name(&self, wire: &str) -> Option<&'static str> {
        self.get(wire).map(|spec| spec.local)
    }

    /// Mapped wire field names
    pub fn wire_fields(&self) -> impl Iterator<Item = &'static str> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().map(|spec| spec.wire)
    }

    /// Wire fields holding nested structures
    pub fn dict_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields_of(FieldKind::Dict)
    }

    /// Wire fields holding timestamps
    pub fn datetime_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields_of(FieldKind::DateTime)
    }

    /// Wire fields holding `Y`/`N` flags
    pub fn bool_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields_of(FieldKind::Flag)
    }

    fn fields_of(&self, kind: FieldKind) -> impl Iterator<Item = &'static str> {
        let fields: &'static [FieldSpec] = self.fields;
        fields
            .iter()
            .filter(move |spec| spec.kind == kind)
            .map(|spec| spec.wire)
    }

    /// Apply the table to one raw payload object
    ///
    /// Fails only when a declared datetime field holds a string in another
    /// format.
    pub fn decode_fields(&self, raw: &JsonObject, zone: Option<Tz>) -> Result<DecodedFields> {
        let mut values = HashMap::with_capacity(self.fields.len());

        for spec in self.fields {
            let Some(value) = raw.get(spec.wire) else {
                continue;
            };

            let decoded = match (spec.kind, value) {
                (FieldKind::Dict, value) => FieldValue::Json(normalize_keys_deep(value)),
                (FieldKind::DateTime, JsonValue::String(s)) => {
                    let ts = parse_timestamp(s, zone).map_err(|source| Error::Decode {
                        entity: self.entity,
                        field: spec.wire,
                        source,
                    })?;
                    FieldValue::Timestamp(ts)
                }
                (FieldKind::Flag, JsonValue::String(s)) => FieldValue::Flag(parse_flag(s)),
                (_, value) => FieldValue::Json(value.clone()),
            };

            values.insert(spec.local, decoded);
        }

        Ok(DecodedFields {
            entity: self.entity,
            values,
        })
    }
}

/// A coerced field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// JSON passed through (or key-normalized)
    Json(JsonValue),
    /// Parsed timestamp
    Timestamp(Timestamp),
    /// Parsed flag
    Flag(bool),
}

impl FieldValue {
    /// Explicit JSON null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Json(JsonValue::Null))
    }
}

/// Output of [`FieldMapping::decode_fields`], keyed by local name
#[derive(Debug, Clone)]
pub struct DecodedFields {
    entity: &'static str,
    values: HashMap<&'static str, FieldValue>,
}

impl DecodedFields {
    /// Borrow a decoded value
    pub fn get(&self, local: &str) -> Option<&FieldValue> {
        self.values.get(local)
    }

    /// Whether the payload carried this field (even as null)
    pub fn contains(&self, local: &str) -> bool {
        self.values.contains_key(local)
    }

    /// Number of mapped fields present in the payload
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no mapped field was present
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Move a value out as a typed attribute
    ///
    /// Absent, null and mis-typed values all read as `None`.
    pub fn take<T: FromField>(&mut self, local: &str) -> Option<T> {
        let value = self.values.remove(local)?;
        if value.is_null() {
            return None;
        }

        let typed = T::from_field(value);
        if typed.is_none() {
            debug!(
                entity = self.entity,
                field = local,
                "Ignoring value with unexpected type"
            );
        }
        typed
    }
}

/// Conversion from a decoded field value into an attribute type
pub trait FromField: Sized {
    /// Convert, or `None` if the value has another type
    fn from_field(value: FieldValue) -> Option<Self>;
}

impl FromField for Timestamp {
    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }
}

impl FromField for bool {
    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Flag(flag) | FieldValue::Json(JsonValue::Bool(flag)) => Some(flag),
            _ => None,
        }
    }
}

fn from_json<T: DeserializeOwned>(value: FieldValue) -> Option<T> {
    match value {
        FieldValue::Json(json) => serde_json::from_value(json).ok(),
        _ => None,
    }
}

macro_rules! from_json_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromField for $ty {
                fn from_field(value: FieldValue) -> Option<Self> {
                    from_json(value)
                }
            }
        )*
    };
}

from_json_field!(
    String,
    i64,
    f64,
    JsonValue,
    JsonObject,
    Vec<JsonObject>,
    Vec<String>,
);
