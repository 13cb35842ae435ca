//! Tests for the resource catalog

use super::*;
use crate::client::AccelaClient;
use crate::coerce::Timestamp;
use crate::entity::{self, Entity};
use crate::error::Error;
use crate::testing::{tenant_client, FakeTransport};
use crate::types::Method;
use chrono::{FixedOffset, NaiveDate, TimeZone};
use chrono_tz::America::New_York;
use serde_json::json;
use std::sync::Arc;
use test_case::test_case;

const BASE: &str = "https://apis.example.com/v4";

fn record_payload() -> serde_json::Value {
    json!({
        "id": "ISLANDTON-24CAP-00000-0001",
        "customId": "BLD-2024-0001",
        "openedDate": "2024-01-15 09:30:00",
        "booking": "N",
        "infraction": "Y",
        "housingUnits": 4,
        "jobValue": 125000.5,
        "type": {"alias": "Residential", "subType": "NewConstruction"},
        "addresses": [{"streetName": "Main", "postalCode": "12345"}],
        "serviceProviderCode": "ISLANDTON"
    })
}

// ============================================================================
// Entity Tests
// ============================================================================

#[test]
fn test_record_decode() {
    let raw = record_payload();
    let record: Record = entity::decode_value(raw.clone(), Some(New_York)).unwrap();

    assert_eq!(record.id.as_deref(), Some("ISLANDTON-24CAP-00000-0001"));
    assert_eq!(record.custom_id.as_deref(), Some("BLD-2024-0001"));
    assert_eq!(record.booking, Some(false));
    assert_eq!(record.infraction, Some(true));
    assert_eq!(record.housing_units, Some(4));
    assert_eq!(record.job_value, Some(125000.5));
    assert_eq!(
        record.opened_date.map(|ts| ts.to_iso_string()),
        Some("2024-01-15T09:30:00-05:00".to_string())
    );

    let record_type = record.record_type.unwrap();
    assert_eq!(record_type["sub_type"], "NewConstruction");

    let addresses = record.addresses.unwrap();
    assert_eq!(addresses[0]["street_name"], "Main");
    assert_eq!(addresses[0]["postal_code"], "12345");

    assert!(record.closed_date.is_none());
    assert_eq!(record.raw["serviceProviderCode"], "ISLANDTON");
    assert_eq!(serde_json::Value::Object(record.raw), raw);
}

#[test]
fn test_record_mapping_markers() {
    let mapping = Record::MAPPING;
    assert_eq!(mapping.local_name("type"), Some("record_type"));
    assert_eq!(mapping.datetime_fields().count(), 11);
    assert_eq!(mapping.bool_fields().count(), 6);
    assert_eq!(mapping.dict_fields().count(), 19);
}

#[test]
fn test_workflow_history_decode() {
    let history: RecordWorkflowTaskHistory = entity::decode_value(
        json!({
            "id": "1-22",
            "isActive": "Y",
            "isCompleted": "n",
            "billable": "N",
            "daysDue": 3,
            "commentPublicVisible": ["ACA", "Citizen"],
            "recordId": {"customId": "BLD-1", "trackingId": 99},
            "statusDate": "2024-02-01 00:00:00"
        }),
        None,
    )
    .unwrap();

    assert_eq!(history.is_active, Some(true));
    assert_eq!(history.is_completed, Some(false));
    assert_eq!(history.billable, Some(false));
    assert_eq!(history.days_due, Some(3));
    assert_eq!(
        history.comment_public_visible,
        Some(vec!["ACA".to_string(), "Citizen".to_string()])
    );
    assert_eq!(history.record_id.unwrap()["tracking_id"], 99);
    assert!(matches!(history.status_date, Some(Timestamp::Naive(_))));
}

#[test]
fn test_activity_decode() {
    let activity: RecordActivity = entity::decode_value(
        json!({"id": 7, "name": "Site visit", "dueDate": null, "type": {"text": "Visit"}}),
        None,
    )
    .unwrap();

    assert_eq!(activity.id, Some(7));
    assert_eq!(activity.name.as_deref(), Some("Site visit"));
    assert!(activity.due_date.is_none());
    assert_eq!(activity.activity_type.unwrap()["text"], "Visit");
}

// ============================================================================
// DateParam Tests
// ============================================================================

#[test_case(DateParam::from(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()), None => "2024-01-15T00:00:00" ; "date without zone")]
#[test_case(DateParam::from(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()), Some(New_York) => "2024-01-15T00:00:00-05:00" ; "date with zone")]
#[test_case(DateParam::from(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap().and_hms_opt(8, 0, 0).unwrap()), Some(New_York) => "2024-07-04T08:00:00-04:00" ; "naive summer time")]
#[test_case(DateParam::from(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_micro_opt(8, 0, 0, 250).unwrap()), None => "2024-01-15T08:00:00.000250" ; "naive with micros")]
#[test_case(DateParam::from(FixedOffset::east_opt(3600).unwrap().with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap()), Some(New_York) => "2024-01-15T08:00:00+01:00" ; "zoned keeps offset")]
fn test_date_param_rendering(param: DateParam, zone: Option<chrono_tz::Tz>) -> String {
    param.to_query_value(zone)
}

#[test]
fn test_date_param_from_str() {
    assert_eq!(
        "2024-01-15".parse::<DateParam>().unwrap(),
        DateParam::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    );
    assert_eq!(
        " 2024-01-15T08:00:00 ".parse::<DateParam>().unwrap(),
        DateParam::Naive(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(8, 0, 0).unwrap())
    );

    let zoned = "2024-01-15T08:00:00+01:00".parse::<DateParam>().unwrap();
    assert!(matches!(zoned, DateParam::Zoned(_)));
    assert_eq!(zoned.to_query_value(Some(New_York)), "2024-01-15T08:00:00+01:00");

    let err = "yesterday".parse::<DateParam>().unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_list_options_query() {
    let mut options = ListOptions::paged(25, 50);
    options.fields = vec!["id".to_string(), "name".to_string()];

    let query = options.to_query();
    assert_eq!(query.get("limit"), Some("25"));
    assert_eq!(query.get("offset"), Some("50"));
    assert_eq!(query.get("fields"), Some("id,name"));

    let query = ListOptions::default().to_query();
    assert_eq!(query.get("limit"), Some("100"));
    assert_eq!(query.get("fields"), None);
}

// ============================================================================
// Requirement Tests
// ============================================================================

struct Agencies {
    client: AccelaClient,
}

impl ApiResource for Agencies {
    const NAME: &'static str = "Agencies";
    const REQUIRES_AGENCY: bool = false;
    const REQUIRES_ENVIRONMENT: bool = false;

    fn new(client: AccelaClient) -> Self {
        Self { client }
    }

    fn client(&self) -> &AccelaClient {
        &self.client
    }
}

fn bare_client(transport: &Arc<FakeTransport>) -> AccelaClient {
    AccelaClient::builder("test-token")
        .agency("TESTAGENCY")
        .transport(transport.clone())
        .build()
        .unwrap()
}

#[test]
fn test_missing_environment_fails_fast() {
    let transport = FakeTransport::new();
    let client = bare_client(&transport);

    let err = client.records().unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(
        err,
        Error::MissingTenant {
            resource: "Records",
            attribute: "environment"
        }
    ));
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn test_missing_agency_reported_first() {
    let transport = FakeTransport::new();
    let client = AccelaClient::builder("t")
        .transport(transport.clone())
        .build()
        .unwrap();

    let err = client.record_activities().unwrap_err();
    assert_eq!(
        err.to_string(),
        "RecordActivities requires an agency; configure the client with one before using it"
    );
}

#[test]
fn test_resource_without_requirements() {
    let transport = FakeTransport::new();
    let client = AccelaClient::builder("t")
        .transport(transport.clone())
        .build()
        .unwrap();

    let agencies = client.resource::<Agencies>().unwrap();
    assert!(agencies.client().agency().is_none());
}

#[test]
fn test_tenant_client_builds_every_resource() {
    let transport = FakeTransport::new();
    let client = tenant_client(&transport);

    assert!(client.records().is_ok());
    assert!(client.my_records().is_ok());
    assert!(client.record_activities().is_ok());
    assert!(client.record_workflow_task_histories().is_ok());
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_records_list_query() {
    let transport = FakeTransport::new();
    transport.push_json(json!({"result": [record_payload()], "page": {"total": 1}}));
    let client = AccelaClient::builder("test-token")
        .agency("TESTAGENCY")
        .environment("TEST")
        .timezone(New_York)
        .base_url(BASE)
        .transport(transport.clone())
        .build()
        .unwrap();

    let params = RecordListParams {
        limit: Some(10),
        module: Some("Building".to_string()),
        opened_date_from: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().into()),
        ..Default::default()
    };
    let list = client.records().unwrap().list(&params).await.unwrap();

    assert_eq!(list.items().len(), 1);
    assert_eq!(
        list.items()[0].opened_date.unwrap().zone(),
        Some(New_York)
    );

    let sent = &transport.requests()[0];
    assert_eq!(sent.method, Method::GET);
    assert_eq!(sent.url, format!("{BASE}/records"));
    assert_eq!(sent.query.get("limit"), Some("10"));
    assert_eq!(sent.query.get("offset"), Some("0"));
    assert_eq!(sent.query.get("module"), Some("Building"));
    assert_eq!(
        sent.query.get("openedDateFrom"),
        Some("2024-01-01T00:00:00-05:00")
    );
    assert_eq!(sent.query.get("status"), None);
    assert_eq!(
        sent.headers.get("Authorization").map(String::as_str),
        Some("test-token")
    );
    assert_eq!(
        sent.headers.get("x-accela-environment").map(String::as_str),
        Some("TEST")
    );
}

#[tokio::test]
async fn test_records_retrieve() {
    let transport = FakeTransport::new();
    transport.push_json(json!({"result": [record_payload()]}));
    let client = tenant_client(&transport);

    let options = RetrieveOptions {
        expand: vec!["addresses".to_string(), "contacts".to_string()],
        expand_custom_forms: Some("true".to_string()),
        ..Default::default()
    };
    let record = client
        .records()
        .unwrap()
        .retrieve("BLD-2024-0001", &options)
        .await
        .unwrap();

    assert_eq!(record.custom_id.as_deref(), Some("BLD-2024-0001"));

    let sent = &transport.requests()[0];
    assert_eq!(sent.query.get("customId"), Some("BLD-2024-0001"));
    assert_eq!(sent.query.get("expand"), Some("addresses,contacts"));
    assert_eq!(sent.query.get("expandCustomForms"), Some("true"));
    assert_eq!(sent.query.get("limit"), None);
}

#[tokio::test]
async fn test_records_retrieve_not_found() {
    let transport = FakeTransport::new();
    transport.push_json(json!({"result": []}));
    let client = tenant_client(&transport);

    let err = client
        .records()
        .unwrap()
        .retrieve("NOPE", &RetrieveOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { resource: "Record", ref id } if id == "NOPE"));
}

#[tokio::test]
async fn test_records_search_posts_body() {
    let transport = FakeTransport::new();
    transport.push_json(json!({"result": [record_payload()], "page": {"hasmore": false}}));
    let client = tenant_client(&transport);

    let search = json!({"module": "Building", "openedDateFrom": "2024-01-01"});
    let options = SearchOptions {
        limit: Some(50),
        expand: vec!["addresses".to_string()],
        expand_custom_forms: Some("true".to_string()),
        ..Default::default()
    };
    let list = client
        .records()
        .unwrap()
        .search(search.clone(), &options)
        .await
        .unwrap();

    assert!(!list.has_more());

    let sent = &transport.requests()[0];
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.url, format!("{BASE}/search/records"));
    assert_eq!(sent.body, Some(search));
    assert_eq!(sent.query.get("limit"), Some("50"));
    assert_eq!(sent.query.get("expand"), Some("addresses"));
    assert_eq!(sent.query.get("expandCustomForms"), Some("true"));
}

#[tokio::test]
async fn test_records_global_search() {
    let transport = FakeTransport::new();
    transport.push_json(json!({"result": []}));
    let client = tenant_client(&transport);

    let list = client
        .records()
        .unwrap()
        .global_search("Main Street", 20, 40)
        .await
        .unwrap();
    assert!(list.items().is_empty());

    let sent = &transport.requests()[0];
    assert_eq!(sent.url, format!("{BASE}/search/global"));
    assert_eq!(sent.query.get("query"), Some("Main Street"));
    assert_eq!(sent.query.get("type"), Some("RECORD"));
    assert_eq!(sent.query.get("limit"), Some("20"));
    assert_eq!(sent.query.get("offset"), Some("40"));
}

#[tokio::test]
async fn test_my_records_query() {
    let transport = FakeTransport::new();
    transport.push_json(json!({"result": []}));
    let client = tenant_client(&transport);

    let params = MyRecordListParams {
        update_date_to: Some(
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
                .into(),
        ),
        status_types: Some("Open,Closed".to_string()),
        fields: vec!["id".to_string()],
        expand_custom_forms: Some("true".to_string()),
        ..Default::default()
    };
    client.my_records().unwrap().list(&params).await.unwrap();

    let sent = &transport.requests()[0];
    assert_eq!(sent.url, format!("{BASE}/records/mine"));
    assert_eq!(sent.query.get("updateDateTo"), Some("2024-03-01T12:00:00"));
    assert_eq!(sent.query.get("statusTypes"), Some("Open,Closed"));
    assert_eq!(sent.query.get("fields"), Some("id"));
    assert_eq!(sent.query.get("expandCustomForms"), Some("true"));
}

#[tokio::test]
async fn test_activities_path_is_escaped() {
    let transport = FakeTransport::new();
    transport.push_json(json!({"result": [{"id": 1, "recordId": "REC 1"}]}));
    let client = tenant_client(&transport);

    let list = client
        .record_activities()
        .unwrap()
        .list("REC 1/A", &ListOptions::default())
        .await
        .unwrap();
    assert_eq!(list.items()[0].record_id.as_deref(), Some("REC 1"));

    let sent = &transport.requests()[0];
    assert_eq!(sent.url, format!("{BASE}/records/REC%201%2FA/activities"));
}

#[tokio::test]
async fn test_workflow_histories_path() {
    let transport = FakeTransport::new();
    transport.push_json(json!({"result": []}));
    let client = tenant_client(&transport);

    client
        .record_workflow_task_histories()
        .unwrap()
        .list("REC-1", &ListOptions::paged(5, 0))
        .await
        .unwrap();

    let sent = &transport.requests()[0];
    assert_eq!(
        sent.url,
        format!("{BASE}/records/REC-1/workflowTasks/histories")
    );
    assert_eq!(sent.query.get("limit"), Some("5"));
}
