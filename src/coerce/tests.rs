//! Tests for wire value coercion

use super::*;
use chrono::{NaiveDate, Timelike};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Key Casing Tests
// ============================================================================

#[test_case("customId", "custom_id")]
#[test_case("openedDate", "opened_date")]
#[test_case("actionbyDepartment", "actionby_department")]
#[test_case("lastModifiedDateString", "last_modified_date_string")]
#[test_case("value2Name", "value2_name")]
#[test_case("recordID", "record_id")]
#[test_case("id", "id")]
#[test_case("", "")]
fn test_to_local_key(wire: &str, local: &str) {
    assert_eq!(to_local_key(wire), local);
}

#[test]
fn test_to_local_key_one_separator_per_boundary() {
    let local = to_local_key("aBcDeF");
    assert_eq!(local, "a_bc_de_f");
    assert_eq!(local.matches('_').count(), 3);
    assert_eq!(local, local.to_lowercase());
}

#[test]
fn test_normalize_keys_deep_nested_arrays() {
    let value = json!({"fooBar": [{"bazQux": 1}]});
    assert_eq!(normalize_keys_deep(&value), json!({"foo_bar": [{"baz_qux": 1}]}));
}

#[test]
fn test_normalize_keys_deep_leaves_values_alone() {
    let value = json!({
        "recordType": {"alias": "Building Permit", "subType": "NewConstruction"},
        "tags": ["keepCamel", 3, null],
        "isOpen": true
    });

    assert_eq!(
        normalize_keys_deep(&value),
        json!({
            "record_type": {"alias": "Building Permit", "sub_type": "NewConstruction"},
            "tags": ["keepCamel", 3, null],
            "is_open": true
        })
    );
}

#[test]
fn test_normalize_keys_deep_scalars_pass_through() {
    assert_eq!(normalize_keys_deep(&json!("someValue")), json!("someValue"));
    assert_eq!(normalize_keys_deep(&json!(null)), json!(null));
    assert_eq!(normalize_keys_deep(&json!(4.5)), json!(4.5));
}

// ============================================================================
// Flag Tests
// ============================================================================

#[test_case("Y", true)]
#[test_case("y", true)]
#[test_case("N", false)]
#[test_case("n", false)]
#[test_case("", false)]
#[test_case("YES", false)]
#[test_case(" Y", false)]
fn test_parse_flag(input: &str, expected: bool) {
    assert_eq!(parse_flag(input), expected);
}

// ============================================================================
// Timestamp Tests
// ============================================================================

#[test]
fn test_parse_timestamp_naive() {
    let ts = parse_timestamp("2024-03-05 13:45:00", None).unwrap();
    let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(13, 45, 0)
        .unwrap();

    assert_eq!(ts, Timestamp::Naive(expected));
    assert!(ts.zone().is_none());
    assert_eq!(ts.to_iso_string(), "2024-03-05T13:45:00");
}

#[test]
fn test_parse_timestamp_zoned_keeps_wall_clock() {
    let zone: chrono_tz::Tz = "America/New_York".parse().unwrap();
    let ts = parse_timestamp("2024-03-05 13:45:00", Some(zone)).unwrap();

    assert_eq!(ts.zone(), Some(zone));
    assert_eq!(ts.naive().hour(), 13);
    assert_eq!(ts.naive().minute(), 45);
    assert_eq!(ts.to_iso_string(), "2024-03-05T13:45:00-05:00");
}

#[test]
fn test_parse_timestamp_zoned_summer_offset() {
    let ts = parse_timestamp("2024-07-01 08:00:00", Some(chrono_tz::America::Chicago)).unwrap();
    assert_eq!(ts.to_iso_string(), "2024-07-01T08:00:00-05:00");
}

#[test]
fn test_attach_zone_in_dst_gap_keeps_wall_clock() {
    // 02:30 does not exist in New York on 2024-03-10
    let naive = NaiveDate::from_ymd_opt(2024, 3, 10)
        .unwrap()
        .and_hms_opt(2, 30, 0)
        .unwrap();
    let dt = attach_zone(naive, chrono_tz::America::New_York);
    assert_eq!(dt.naive_local(), naive);
}

#[test_case("03/05/2024")]
#[test_case("2024-03-05")]
#[test_case("2024-03-05T13:45:00")]
#[test_case("2024-03-05 13:45:00.123")]
#[test_case("")]
fn test_parse_timestamp_rejects_other_formats(input: &str) {
    let err = parse_timestamp(input, None).unwrap_err();
    assert_eq!(err.value, input);
}

#[test]
fn test_timestamp_serializes_as_iso_string() {
    let ts = parse_timestamp("2023-11-30 00:00:01", None).unwrap();
    assert_eq!(serde_json::to_value(ts).unwrap(), json!("2023-11-30T00:00:01"));
}
