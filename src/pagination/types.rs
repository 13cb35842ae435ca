//! Page envelope parsing

use crate::entity::{self, json_kind, Entity};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use chrono_tz::Tz;
use tracing::warn;

/// Page size used when a request does not carry a `limit`
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// One page of a list response, before item decoding
///
/// ```text
/// { "result": [...], "page": { "offset": 0, "limit": 100, "total": 250, "hasmore": true } }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageEnvelope {
    /// Items under the result key
    pub items: Vec<JsonValue>,
    /// Total reported by the server (root `total`, then `page.total`)
    pub total: Option<u64>,
    /// `page.hasmore`, when the server reports it
    pub has_more: Option<bool>,
}

impl PageEnvelope {
    /// Split a response body into items and paging metadata
    ///
    /// A missing or null result key is an empty page. A `null` body is an
    /// empty page too.
    pub fn parse(body: JsonValue, result_key: &str) -> Result<Self> {
        let mut root = match body {
            JsonValue::Object(root) => root,
            JsonValue::Null => return Ok(Self::default()),
            other => {
                return Err(Error::shape(format!(
                    "expected a page object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let items = match root.remove(result_key) {
            None | Some(JsonValue::Null) => Vec::new(),
            Some(JsonValue::Array(items)) => items,
            Some(other) => {
                return Err(Error::shape(format!(
                    "expected '{result_key}' to be an array, got {}",
                    json_kind(&other)
                )))
            }
        };

        let page = root.get("page").and_then(JsonValue::as_object);

        let total = root
            .get("total")
            .and_then(JsonValue::as_u64)
            .or_else(|| page.and_then(|p| p.get("total")).and_then(JsonValue::as_u64));

        let has_more = page
            .and_then(|p| p.get("hasmore"))
            .and_then(JsonValue::as_bool);

        Ok(Self {
            items,
            total,
            has_more,
        })
    }

    /// Decode every item into `E`
    ///
    /// A failing item is dropped without touching its siblings; the first
    /// failure is returned alongside the entities that did decode.
    pub fn decode_items<E: Entity>(self, zone: Option<Tz>) -> DecodedItems<E> {
        let mut decoded = DecodedItems {
            items: Vec::with_capacity(self.items.len()),
            failure: None,
        };

        for (index, item) in self.items.into_iter().enumerate() {
            match entity::decode_value(item, zone) {
                Ok(entity) => decoded.items.push(entity),
                Err(err) => {
                    warn!(
                        entity = E::MAPPING.entity,
                        index,
                        error = %err,
                        "Skipping undecodable item"
                    );
                    decoded.failure.get_or_insert(err);
                }
            }
        }

        decoded
    }
}

/// Entities decoded from one page
#[derive(Debug)]
pub struct DecodedItems<E> {
    /// Entities that decoded, in page order
    pub items: Vec<E>,
    /// First decode failure on the page
    pub failure: Option<Error>,
}

impl<E> DecodedItems<E> {
    /// All entities, or the first failure
    pub fn into_result(self) -> Result<Vec<E>> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }
}

/// Decide whether another page exists
///
/// A reported `hasmore` wins. Otherwise a full page that stops short of the
/// total means more data.
pub fn resolve_has_more(
    reported: Option<bool>,
    returned: usize,
    limit: u32,
    offset: u32,
    total: u64,
) -> bool {
    if limit == 0 {
        return false;
    }
    match reported {
        Some(flag) => flag,
        None => returned == limit as usize && u64::from(offset) + u64::from(limit) < total,
    }
}
