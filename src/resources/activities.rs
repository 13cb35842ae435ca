//! Record activities

use super::params::ListOptions;
use super::records::RESULT_KEY;
use super::ApiResource;
use crate::client::AccelaClient;
use crate::coerce::Timestamp;
use crate::error::Result;
use crate::http::ApiRequest;
use crate::pagination::ListResponse;
use crate::types::{JsonObject, Method};

crate::define_entity! {
    /// An activity attached to a record
    pub struct RecordActivity {
        id: i64 = "id",
        activity_status: JsonObject = "activityStatus" => dict,
        assigned_department: JsonObject = "assignedDepartment" => dict,
        assigned_user: JsonObject = "assignedUser" => dict,
        description: String = "description",
        due_date: Timestamp = "dueDate" => datetime,
        name: String = "name",
        priority: JsonObject = "priority" => dict,
        start_date: Timestamp = "startDate" => datetime,
        activity_type: JsonObject = "type" => dict,
        record_id: String = "recordId",
    }
}

/// `/records/{id}/activities` endpoint
#[derive(Debug, Clone)]
pub struct RecordActivities {
    client: AccelaClient,
}

impl ApiResource for RecordActivities {
    const NAME: &'static str = "RecordActivities";

    fn new(client: AccelaClient) -> Self {
        Self { client }
    }

    fn client(&self) -> &AccelaClient {
        &self.client
    }
}

impl RecordActivities {
    /// List the activities of one record
    pub async fn list(
        &self,
        record_id: &str,
        options: &ListOptions,
    ) -> Result<ListResponse<RecordActivity>> {
        let url = self.client.url(&["records", record_id, "activities"])?;
        let request = ApiRequest::new(Method::GET, url).with_query(options.to_query());
        self.client.list(request, RESULT_KEY).await
    }
}
