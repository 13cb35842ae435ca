//! Wire value coercion
//!
//! Pure conversions from the API's wire representations into native values:
//!
//! - camelCase keys to snake_case (`to_local_key`, `normalize_keys_deep`)
//! - `"Y"`/`"N"` flags to `bool` (`parse_flag`)
//! - naive `YYYY-MM-DD HH:MM:SS` strings to [`Timestamp`] (`parse_timestamp`)

mod keys;
mod timestamp;

pub use keys::{normalize_keys_deep, to_local_key};
pub use timestamp::{attach_zone, parse_timestamp, Timestamp, WIRE_TIMESTAMP_FORMAT};

/// Parse an Accela flag string
///
/// `"Y"` in any case is true; everything else, including garbage, is false.
pub fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("Y")
}

#[cfg(test)]
mod tests;
