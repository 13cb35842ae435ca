//! Pagination module
//!
//! Accela list endpoints are offset paged. Every list response carries its
//! items under a result key plus a `page` object:
//!
//! ```text
//! { "result": [...], "page": { "offset": 0, "limit": 100, "total": 250, "hasmore": true } }
//! ```
//!
//! [`ListResponse`] wraps the first page and fetches the rest lazily, one
//! request per page, re-issuing the original request with a larger offset.
//!
//! # Termination
//!
//! - `page.hasmore` decides when present
//! - otherwise a full page short of `total` means more
//! - an empty page always ends the list
//!
//! # Decode failures
//!
//! An item that fails to decode (a malformed timestamp, say) is dropped on
//! its own. Streams yield the page's other entities first, then the error.

mod list_response;
mod types;

pub use list_response::ListResponse;
pub use types::{resolve_has_more, DecodedItems, PageEnvelope, DEFAULT_PAGE_SIZE};
