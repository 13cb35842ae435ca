//! Declarative field mapping
//!
//! Each entity type carries a static [`FieldMapping`]: the wire fields it
//! understands, their local names, and how their values are coerced.
//!
//! # Overview
//!
//! Decoding walks the table, never the payload. Wire fields missing from the
//! table are ignored (the raw payload keeps them); table fields missing from
//! the payload produce no value. Coercion follows the field kind:
//!
//! | Kind       | Wire value            | Decoded value                    |
//! |------------|-----------------------|----------------------------------|
//! | `Dict`     | object / array        | same shape, keys in snake_case   |
//! | `DateTime` | `"2024-03-05 13:45:00"` | [`Timestamp`](crate::coerce::Timestamp) |
//! | `Flag`     | `"Y"` / `"N"`         | `bool`                           |
//! | `Plain`    | anything              | unchanged                        |

mod types;

pub use types::{DecodedFields, FieldKind, FieldMapping, FieldSpec, FieldValue, FromField};
