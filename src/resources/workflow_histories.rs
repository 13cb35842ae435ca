//! Record workflow task histories

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
    /// One step in a record's workflow history
    pub struct RecordWorkflowTaskHistory {
        id: String = "id",
        action: String = "action",
        actionby_department: JsonObject = "actionbyDepartment" => dict,
        actionby_user: JsonObject = "actionbyUser" => dict,
        approval: String = "approval",
        assign_email_display: String = "assignEmailDisplay",
        assigned_date: Timestamp = "assignedDate" => datetime,
        assigned_to_department: JsonObject = "assignedToDepartment" => dict,
        assigned_user: JsonObject = "assignedUser" => dict,
        billable: bool = "billable" => flag,
        comment: String = "comment",
        comment_display: String = "commentDisplay",
        comment_public_visible: Vec<String> = "commentPublicVisible",
        current_task_id: String = "currentTaskId",
        days_due: i64 = "daysDue",
        description: String = "description",
        disposition_note: String = "dispositionNote",
        due_date: Timestamp = "dueDate" => datetime,
        end_time: Timestamp = "endTime" => datetime,
        estimated_due_date: Timestamp = "estimatedDueDate" => datetime,
        estimated_hours: f64 = "estimatedHours",
        hours_spent: f64 = "hoursSpent",
        in_possession_time: f64 = "inPossessionTime",
        is_active: bool = "isActive" => flag,
        is_completed: bool = "isCompleted" => flag,
        last_modified_date: Timestamp = "lastModifiedDate" => datetime,
        last_modified_date_string: String = "lastModifiedDateString",
        next_task_id: String = "nextTaskId",
        over_time: String = "overTime",
        process_code: String = "processCode",
        record_id: JsonObject = "recordId" => dict,
        service_provider_code: String = "serviceProviderCode",
        start_time: Timestamp = "startTime" => datetime,
        status: JsonObject = "status" => dict,
        status_date: Timestamp = "statusDate" => datetime,
        track_start_date: Timestamp = "trackStartDate" => datetime,
    }
}

/// `/records/{id}/workflowTasks/histories` endpoint
#[derive(Debug, Clone)]
pub struct RecordWorkflowTaskHistories {
    client: AccelaClient,
}

impl ApiResource for RecordWorkflowTaskHistories {
    const NAME: &'static str = "RecordWorkflowTaskHistories";

    fn new(client: AccelaClient) -> Self {
        Self { client }
    }

    fn client(&self) -> &AccelaClient {
        &self.client
    }
}

impl RecordWorkflowTaskHistories {
    /// List the workflow task history of one record
    pub async fn list(
        &self,
        record_id: &str,
        options: &ListOptions,
    ) -> Result<ListResponse<RecordWorkflowTaskHistory>> {
        let url = self
            .client
            .url(&["records", record_id, "workflowTasks", "histories"])?;
        let request = ApiRequest::new(Method::GET, url).with_query(options.to_query());
        self.client.list(request, RESULT_KEY).await
    }
}
