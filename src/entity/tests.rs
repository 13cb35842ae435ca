//! Tests for the entity model

use super::*;
use crate::coerce::Timestamp;
use crate::mapping::FieldKind;
use pretty_assertions::assert_eq;
use serde_json::json;

crate::define_entity! {
    /// Entity used only by these tests
    pub struct Fee {
        id: i64 = "id",
        code: String = "feeCode",
        amount: f64 = "amount",
        schedule: JsonObject = "feeSchedule" => dict,
        invoiced_date: Timestamp = "invoicedDate" => datetime,
        is_paid: bool = "isPaid" => flag,
    }
}

fn payload() -> JsonObject {
    json!({
        "id": 9001,
        "feeCode": "BLD-100",
        "amount": 125.5,
        "feeSchedule": {"scheduleName": "Building", "version": "2024"},
        "invoicedDate": "2024-02-29 17:05:09",
        "isPaid": "N",
        "notInTable": {"keepMe": true}
    })
    .as_object()
    .cloned()
    .unwrap()
}

#[test]
fn test_generated_mapping_table() {
    let mapping = Fee::MAPPING;
    assert_eq!(mapping.entity, "Fee");
    assert_eq!(mapping.fields.len(), 6);
    assert_eq!(mapping.local_name("feeCode"), Some("code"));
    assert_eq!(mapping.get("isPaid").map(|s| s.kind), Some(FieldKind::Flag));
    assert_eq!(mapping.get("id").map(|s| s.kind), Some(FieldKind::Plain));
}

#[test]
fn test_decode_typed_attributes() {
    let fee: Fee = decode(&payload(), None).unwrap();

    assert_eq!(fee.id, Some(9001));
    assert_eq!(fee.code.as_deref(), Some("BLD-100"));
    assert_eq!(fee.amount, Some(125.5));
    assert_eq!(
        fee.schedule,
        json!({"schedule_name": "Building", "version": "2024"})
            .as_object()
            .cloned()
    );
    assert_eq!(
        fee.invoiced_date.map(|ts| ts.to_iso_string()),
        Some("2024-02-29T17:05:09".to_string())
    );
    assert_eq!(fee.is_paid, Some(false));
}

#[test]
fn test_raw_payload_is_kept_verbatim() {
    let raw = payload();
    let fee: Fee = decode(&raw, None).unwrap();
    assert_eq!(fee.raw(), &raw);
    assert_eq!(fee.raw["notInTable"], json!({"keepMe": true}));
}

#[test]
fn test_absent_and_null_attributes_are_equal() {
    let absent: Fee = decode_value(json!({"id": 1}), None).unwrap();
    let null: Fee = decode_value(json!({"id": 1, "feeCode": null, "isPaid": null}), None).unwrap();

    assert_eq!(absent.code, null.code);
    assert_eq!(absent.is_paid, null.is_paid);
    assert!(absent.code.is_none());
}

#[test]
fn test_decode_value_rejects_non_objects() {
    let err = decode_value::<Fee>(json!([1, 2]), None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected response shape: expected a Fee object, got an array"
    );
}

#[test]
fn test_decode_bad_timestamp_fails() {
    let err = decode_value::<Fee>(json!({"invoicedDate": "yesterday"}), None).unwrap_err();
    assert!(matches!(err, Error::Decode { field: "invoicedDate", .. }));
}

#[test]
fn test_encode_excludes_raw() {
    let fee: Fee = decode(&payload(), None).unwrap();
    let encoded = encode(&fee).unwrap();

    assert!(!encoded.contains_key("raw"));
    assert!(!encoded.contains_key("notInTable"));
    assert_eq!(encoded["code"], json!("BLD-100"));
    assert_eq!(encoded["invoiced_date"], json!("2024-02-29T17:05:09"));
    assert_eq!(encoded["is_paid"], json!(false));
}

#[test]
fn test_encode_keeps_empty_attributes_as_null() {
    let fee: Fee = decode_value(json!({"id": 3}), None).unwrap();
    let encoded = encode(&fee).unwrap();
    assert_eq!(encoded["amount"], json!(null));
    assert_eq!(encoded.len(), 6);
}

#[test]
fn test_to_json_compact_and_pretty() {
    let fee: Fee = decode_value(json!({"id": 3}), None).unwrap();

    let compact = to_json(&fee, false).unwrap();
    assert!(!compact.contains('\n'));
    assert!(compact.contains("\"id\":3"));

    let pretty = to_json(&fee, true).unwrap();
    assert!(pretty.contains("\n  \"id\": 3"));
}
