//! Records of the authenticated user

use super::params::{page_query, set_date, DateParam};
use super::records::{Record, RESULT_KEY};
use super::ApiResource;
use crate::client::AccelaClient;
use crate::error::Result;
use crate::http::{ApiRequest, QueryParams};
use crate::pagination::ListResponse;
use crate::types::Method;
use chrono_tz::Tz;

/// Filters for `GET /records/mine`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MyRecordListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub record_type: Option<String>,
    pub opened_date_from: Option<DateParam>,
    pub opened_date_to: Option<DateParam>,
    pub custom_id: Option<String>,
    pub module: Option<String>,
    pub status: Option<String>,
    pub assigned_date_from: Option<DateParam>,
    pub assigned_date_to: Option<DateParam>,
    pub completed_date_from: Option<DateParam>,
    pub completed_date_to: Option<DateParam>,
    pub status_date_from: Option<DateParam>,
    pub status_date_to: Option<DateParam>,
    pub update_date_from: Option<DateParam>,
    pub update_date_to: Option<DateParam>,
    pub completed_by_department: Option<String>,
    pub completed_by_user: Option<String>,
    pub closed_date_from: Option<DateParam>,
    pub closed_date_to: Option<DateParam>,
    pub closed_by_department: Option<String>,
    pub closed_by_user: Option<String>,
    pub record_class: Option<String>,
    /// Comma-separated record types
    pub types: Option<String>,
    /// Comma-separated modules
    pub modules: Option<String>,
    /// Comma-separated status types
    pub status_types: Option<String>,
    pub expand: Vec<String>,
    pub expand_custom_forms: Option<String>,
    pub fields: Vec<String>,
}

impl MyRecordListParams {
    pub(crate) fn to_query(&self, zone: Option<Tz>) -> QueryParams {
        let mut q = page_query(self.limit, self.offset);
        q.set_opt("type", self.record_type.as_deref());
        set_date(&mut q, "openedDateFrom", self.opened_date_from, zone);
        set_date(&mut q, "openedDateTo", self.opened_date_to, zone);
        q.set_opt("customId", self.custom_id.as_deref());
        q.set_opt("module", self.module.as_deref());
        q.set_opt("status", self.status.as_deref());
        set_date(&mut q, "assignedDateFrom", self.assigned_date_from, zone);
        set_date(&mut q, "assignedDateTo", self.assigned_date_to, zone);
        set_date(&mut q, "completedDateFrom", self.completed_date_from, zone);
        set_date(&mut q, "completedDateTo", self.completed_date_to, zone);
        set_date(&mut q, "statusDateFrom", self.status_date_from, zone);
        set_date(&mut q, "statusDateTo", self.status_date_to, zone);
        set_date(&mut q, "updateDateFrom", self.update_date_from, zone);
        set_date(&mut q, "updateDateTo", self.update_date_to, zone);
        q.set_opt("completedByDepartment", self.completed_by_department.as_deref());
        q.set_opt("completedByUser", self.completed_by_user.as_deref());
        set_date(&mut q, "closedDateFrom", self.closed_date_from, zone);
        set_date(&mut q, "closedDateTo", self.closed_date_to, zone);
        q.set_opt("closedByDepartment", self.closed_by_department.as_deref());
        q.set_opt("closedByUser", self.closed_by_user.as_deref());
        q.set_opt("recordClass", self.record_class.as_deref());
        q.set_opt("types", self.types.as_deref());
        q.set_opt("modules", self.modules.as_deref());
        q.set_opt("statusTypes", self.status_types.as_deref());
        q.set_list("expand", &self.expand);
        q.set_opt("expandCustomForms", self.expand_custom_forms.as_deref());
        q.set_list("fields", &self.fields);
        q
    }
}

/// `/records/mine` endpoint
#[derive(Debug, Clone)]
pub struct MyRecords {
    client: AccelaClient,
}

impl ApiResource for MyRecords {
    const NAME: &'static str = "MyRecords";

    fn new(client: AccelaClient) -> Self {
        Self { client }
    }

    fn client(&self) -> &AccelaClient {
        &self.client
    }
}

impl MyRecords {
    /// List the current user's records
    pub async fn list(&self, params: &MyRecordListParams) -> Result<ListResponse<Record>> {
        let url = self.client.url(&["records", "mine"])?;
        let query = params.to_query(self.client.timezone());
        self.client
            .list(ApiRequest::new(Method::GET, url).with_query(query), RESULT_KEY)
            .await
    }
}
