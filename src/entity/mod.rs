//! Entity model
//!
//! An entity is a typed view over one API object. It holds every mapped
//! attribute as an `Option` plus the untouched payload, so fields the
//! mapping does not know about are never lost.
//!
//! Entities are declared with [`define_entity!`](crate::define_entity), which
//! generates the struct, its [`FieldMapping`] table and the decode glue from a
//! single field list.

use crate::error::{Error, Result};
use crate::mapping::{DecodedFields, FieldMapping};
use crate::types::{JsonObject, JsonValue};
use chrono_tz::Tz;
use serde::Serialize;

/// A typed API object decoded through a [`FieldMapping`]
pub trait Entity: Serialize + Sized {
    /// Mapping table shared by every instance of this type
    const MAPPING: FieldMapping;

    /// Build the entity from decoded fields and the original payload
    fn from_fields(fields: DecodedFields, raw: JsonObject) -> Self;

    /// The payload this entity was decoded from
    fn raw(&self) -> &JsonObject;
}

/// Decode one payload object
pub fn decode<E: Entity>(raw: &JsonObject, zone: Option<Tz>) -> Result<E> {
    let fields = E::MAPPING.decode_fields(raw, zone)?;
    Ok(E::from_fields(fields, raw.clone()))
}

/// Decode an owned JSON value, which must be an object
pub fn decode_value<E: Entity>(value: JsonValue, zone: Option<Tz>) -> Result<E> {
    match value {
        JsonValue::Object(raw) => {
            let fields = E::MAPPING.decode_fields(&raw, zone)?;
            Ok(E::from_fields(fields, raw))
        }
        other => Err(Error::shape(format!(
            "expected a {} object, got {}",
            E::MAPPING.entity,
            json_kind(&other)
        ))),
    }
}

/// Project an entity's typed attributes into a plain JSON object
///
/// The raw payload is not included. Timestamps render as ISO-8601 strings.
pub fn encode<E: Entity>(entity: &E) -> Result<JsonObject> {
    match serde_json::to_value(entity)? {
        JsonValue::Object(map) => Ok(map),
        other => Err(Error::shape(format!(
            "{} serialized to {}",
            E::MAPPING.entity,
            json_kind(&other)
        ))),
    }
}

/// Serialize an entity's typed attributes as a JSON string
pub fn to_json<E: Entity>(entity: &E, pretty: bool) -> Result<String> {
    let map = encode(entity)?;
    let json = if pretty {
        serde_json::to_string_pretty(&map)?
    } else {
        serde_json::to_string(&map)?
    };
    Ok(json)
}

pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Declare an [`Entity`] from one field list
///
/// Each line is `local_name: Type = "wireName"`, optionally followed by
/// `=> dict`, `=> datetime` or `=> flag`. Every attribute becomes
/// `pub local_name: Option<Type>` and the struct gains a `raw` payload field
/// that is skipped on serialization.
///
/// ```rust,ignore
/// define_entity! {
///     /// A permit inspection
///     pub struct Inspection {
///         id: i64 = "id",
///         scheduled_date: Timestamp = "scheduledDate" => datetime,
///         is_passed: bool = "isPassed" => flag,
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_entity {
    (@kind) => { $crate::mapping::FieldKind::Plain };
    (@kind dict) => { $crate::mapping::FieldKind::Dict };
    (@kind datetime) => { $crate::mapping::FieldKind::DateTime };
    (@kind flag) => { $crate::mapping::FieldKind::Flag };

    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty = $wire:literal $(=> $kind:ident)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: Option<$ty>,
            )*
            /// Payload this entity was decoded from
            #[serde(skip)]
            pub raw: $crate::types::JsonObject,
        }

        impl $crate::entity::Entity for $name {
            const MAPPING: $crate::mapping::FieldMapping = $crate::mapping::FieldMapping {
                entity: stringify!($name),
                fields: &[
                    $(
                        $crate::mapping::FieldSpec {
                            wire: $wire,
                            local: stringify!($field),
                            kind: $crate::define_entity!(@kind $($kind)?),
                        },
                    )*
                ],
            };

            fn from_fields(
                mut fields: $crate::mapping::DecodedFields,
                raw: $crate::types::JsonObject,
            ) -> Self {
                Self {
                    $( $field: fields.take::<$ty>(stringify!($field)), )*
                    raw,
                }
            }

            fn raw(&self) -> &$crate::types::JsonObject {
                &self.raw
            }
        }
    };
}

#[cfg(test)]
mod tests;
