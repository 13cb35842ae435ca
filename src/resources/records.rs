//! Records resource

use super::params::{page_query, set_date, DateParam};
use super::ApiResource;
use crate::client::AccelaClient;
use crate::coerce::Timestamp;
use crate::entity;
use crate::error::{Error, Result};
use crate::http::{ApiRequest, QueryParams};
use crate::pagination::{ListResponse, PageEnvelope};
use crate::types::{JsonObject, JsonValue, Method};
use chrono_tz::Tz;
use tracing::debug;

pub(crate) const RESULT_KEY: &str = "result";

crate::define_entity! {
    /// An Accela record (permit, license, case, ...)
    pub struct Record {
        id: String = "id",
        actual_production_unit: f64 = "actualProductionUnit",
        addresses: Vec<JsonObject> = "addresses" => dict,
        appearance_date: Timestamp = "appearanceDate" => datetime,
        appearance_day_of_week: String = "appearanceDayOfWeek",
        assets: Vec<JsonObject> = "assets" => dict,
        assigned_date: Timestamp = "assignedDate" => datetime,
        assigned_to_department: String = "assignedToDepartment",
        assigned_user: String = "assignedUser",
        balance: f64 = "balance",
        booking: bool = "booking" => flag,
        closed_by_department: String = "closedByDepartment",
        closed_by_user: String = "closedByUser",
        closed_date: Timestamp = "closedDate" => datetime,
        complete_date: Timestamp = "completeDate" => datetime,
        completed_by_department: String = "completedByDepartment",
        completed_by_user: String = "completedByUser",
        condition_of_approvals: Vec<JsonObject> = "conditionOfApprovals" => dict,
        conditions: Vec<JsonObject> = "conditions" => dict,
        construction_type: JsonObject = "constructionType" => dict,
        contact: Vec<JsonObject> = "contact" => dict,
        cost_per_unit: f64 = "costPerUnit",
        created_by: String = "createdBy",
        created_by_cloning: String = "createdByCloning",
        custom_forms: Vec<JsonObject> = "customForms" => dict,
        custom_id: String = "customId",
        custom_tables: Vec<JsonObject> = "customTables" => dict,
        defendant_signature: bool = "defendantSignature" => flag,
        description: String = "description",
        enforce_department: String = "enforceDepartment",
        enforce_user: String = "enforceUser",
        enforce_user_id: String = "enforceUserId",
        estimated_cost_per_unit: f64 = "estimatedCostPerUnit",
        estimated_due_date: Timestamp = "estimatedDueDate" => datetime,
        estimated_production_unit: f64 = "estimatedProductionUnit",
        estimated_total_job_cost: f64 = "estimatedTotalJobCost",
        first_issued_date: Timestamp = "firstIssuedDate" => datetime,
        housing_units: i64 = "housingUnits",
        in_possession_time: f64 = "inPossessionTime",
        infraction: bool = "infraction" => flag,
        initiated_product: String = "initiatedProduct",
        inspector_department: String = "inspectorDepartment",
        inspector_id: String = "inspectorId",
        inspector_name: String = "inspectorName",
        job_value: f64 = "jobValue",
        misdemeanor: bool = "misdemeanor" => flag,
        module: String = "module",
        name: String = "name",
        number_of_buildings: i64 = "numberOfBuildings",
        offense_witnessed: bool = "offenseWitnessed" => flag,
        opened_date: Timestamp = "openedDate" => datetime,
        overall_application_time: f64 = "overallApplicationTime",
        owner: Vec<JsonObject> = "owner" => dict,
        parcel: Vec<JsonObject> = "parcel" => dict,
        priority: JsonObject = "priority" => dict,
        professional: Vec<JsonObject> = "professional" => dict,
        public_owned: bool = "publicOwned" => flag,
        record_class: String = "recordClass",
        renewal_info: JsonObject = "renewalInfo" => dict,
        reported_channel: JsonObject = "reportedChannel" => dict,
        reported_date: Timestamp = "reportedDate" => datetime,
        reported_type: JsonObject = "reportedType" => dict,
        scheduled_date: Timestamp = "scheduledDate" => datetime,
        severity: JsonObject = "severity" => dict,
        short_notes: String = "shortNotes",
        status: JsonObject = "status" => dict,
        status_date: Timestamp = "statusDate" => datetime,
        status_reason: JsonObject = "statusReason" => dict,
        status_type: String = "statusType",
        total_fee: f64 = "totalFee",
        total_job_cost: f64 = "totalJobCost",
        total_pay: f64 = "totalPay",
        tracking_id: i64 = "trackingId",
        record_type: JsonObject = "type" => dict,
        undistributed_cost: f64 = "undistributedCost",
        update_date: Timestamp = "updateDate" => datetime,
        value: String = "value",
    }
}

/// Filters for `GET /records`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub record_type: Option<String>,
    pub opened_date_from: Option<DateParam>,
    pub opened_date_to: Option<DateParam>,
    pub custom_id: Option<String>,
    pub module: Option<String>,
    pub status: Option<String>,
    pub assigned_to_department: Option<String>,
    pub assigned_user: Option<String>,
    pub assigned_date_from: Option<DateParam>,
    pub assigned_date_to: Option<DateParam>,
    pub completed_date_from: Option<DateParam>,
    pub completed_date_to: Option<DateParam>,
    pub status_date_from: Option<DateParam>,
    pub status_date_to: Option<DateParam>,
    pub completed_by_department: Option<String>,
    pub completed_by_user: Option<String>,
    pub closed_date_from: Option<DateParam>,
    pub closed_date_to: Option<DateParam>,
    pub closed_by_department: Option<String>,
    pub closed_by_user: Option<String>,
    pub record_class: Option<String>,
}

impl RecordListParams {
    pub(crate) fn to_query(&self, zone: Option<Tz>) -> QueryParams {
        let mut q = page_query(self.limit, self.offset);
        q.set_opt("type", self.record_type.as_deref());
        set_date(&mut q, "openedDateFrom", self.opened_date_from, zone);
        set_date(&mut q, "openedDateTo", self.opened_date_to, zone);
        q.set_opt("customId", self.custom_id.as_deref());
        q.set_opt("module", self.module.as_deref());
        q.set_opt("status", self.status.as_deref());
        q.set_opt("assignedToDepartment", self.assigned_to_department.as_deref());
        q.set_opt("assignedUser", self.assigned_user.as_deref());
        set_date(&mut q, "assignedDateFrom", self.assigned_date_from, zone);
        set_date(&mut q, "assignedDateTo", self.assigned_date_to, zone);
        set_date(&mut q, "completedDateFrom", self.completed_date_from, zone);
        set_date(&mut q, "completedDateTo", self.completed_date_to, zone);
        set_date(&mut q, "statusDateFrom", self.status_date_from, zone);
        set_date(&mut q, "statusDateTo", self.status_date_to, zone);
        q.set_opt("completedByDepartment", self.completed_by_department.as_deref());
        q.set_opt("completedByUser", self.completed_by_user.as_deref());
        set_date(&mut q, "closedDateFrom", self.closed_date_from, zone);
        set_date(&mut q, "closedDateTo", self.closed_date_to, zone);
        q.set_opt("closedByDepartment", self.closed_by_department.as_deref());
        q.set_opt("closedByUser", self.closed_by_user.as_deref());
        q.set_opt("recordClass", self.record_class.as_deref());
        q
    }
}

/// Sub-resource expansion for a single record lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrieveOptions {
    /// Sub-resources to expand, e.g. `addresses`, `contacts`
    pub expand: Vec<String>,
    /// Fields to return
    pub fields: Vec<String>,
    pub expand_custom_forms: Option<String>,
}

/// Paging and expansion for `POST /search/records`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub expand: Vec<String>,
    pub fields: Vec<String>,
    pub expand_custom_forms: Option<String>,
}

/// `/records` endpoints
#[derive(Debug, Clone)]
pub struct Records {
    client: AccelaClient,
}

impl ApiResource for Records {
    const NAME: &'static str = "Records";

    fn new(client: AccelaClient) -> Self {
        Self { client }
    }

    fn client(&self) -> &AccelaClient {
        &self.client
    }
}

impl Records {
    /// List records matching the filters
    pub async fn list(&self, params: &RecordListParams) -> Result<ListResponse<Record>> {
        let url = self.client.url(&["records"])?;
        let query = params.to_query(self.client.timezone());
        self.client
            .list(ApiRequest::new(Method::GET, url).with_query(query), RESULT_KEY)
            .await
    }

    /// Fetch one record by its custom id
    ///
    /// Fails with `Error::NotFound` when the lookup matches nothing.
    pub async fn retrieve(&self, custom_id: &str, options: &RetrieveOptions) -> Result<Record> {
        let url = self.client.url(&["records"])?;

        let mut query = QueryParams::new().param("customId", custom_id);
        query.set_list("expand", &options.expand);
        query.set_list("fields", &options.fields);
        query.set_opt("expandCustomForms", options.expand_custom_forms.as_deref());

        let body = self.client.get(&url, query).await?;
        let page = PageEnvelope::parse(body, RESULT_KEY)?;
        debug!(custom_id, matches = page.items.len(), "Record lookup");

        let first = page
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found("Record", custom_id))?;

        entity::decode_value(first, self.client.timezone())
    }

    /// Search records with a structured query body
    ///
    /// Follow-up pages repeat the POST with the same body.
    pub async fn search(
        &self,
        search_query: JsonValue,
        options: &SearchOptions,
    ) -> Result<ListResponse<Record>> {
        let url = self.client.url(&["search", "records"])?;

        let mut query = page_query(options.limit, options.offset);
        query.set_list("fields", &options.fields);
        query.set_list("expand", &options.expand);
        query.set_opt("expandCustomForms", options.expand_custom_forms.as_deref());

        let request = ApiRequest::new(Method::POST, url)
            .with_query(query)
            .with_body(Some(search_query));
        self.client.list(request, RESULT_KEY).await
    }

    /// Free-text search across records
    pub async fn global_search(
        &self,
        text: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ListResponse<Record>> {
        let url = self.client.url(&["search", "global"])?;
        let query = QueryParams::paged(limit, offset)
            .param("query", text)
            .param("type", "RECORD");

        self.client
            .list(ApiRequest::new(Method::GET, url).with_query(query), RESULT_KEY)
            .await
    }
}
