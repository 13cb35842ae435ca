//! Resource catalog
//!
//! Each resource is a thin handle over an [`AccelaClient`] that knows its
//! endpoints and the entity type they return. Handles are obtained from the
//! client (`client.records()`, `client.resource::<R>()`), which checks the
//! resource's tenant requirements before handing one out.
//!
//! | Resource | Endpoint | Entity |
//! |----------|----------|--------|
//! | [`Records`] | `/records`, `/search/records`, `/search/global` | [`Record`] |
//! | [`MyRecords`] | `/records/mine` | [`Record`] |
//! | [`RecordActivities`] | `/records/{id}/activities` | [`RecordActivity`] |
//! | [`RecordWorkflowTaskHistories`] | `/records/{id}/workflowTasks/histories` | [`RecordWorkflowTaskHistory`] |

mod activities;
mod my_records;
mod params;
mod records;
mod workflow_histories;

use crate::client::AccelaClient;

pub use activities::{RecordActivities, RecordActivity};
pub use my_records::{MyRecordListParams, MyRecords};
pub use params::{DateParam, ListOptions};
pub use records::{Record, RecordListParams, Records, RetrieveOptions, SearchOptions};
pub use workflow_histories::{RecordWorkflowTaskHistories, RecordWorkflowTaskHistory};

/// A handle to one family of API endpoints
///
/// Resources are agency scoped unless they say otherwise; the client refuses
/// to construct one whose requirements it cannot meet.
///
/// Implementing this trait is how callers register their own resources:
/// any implementor can be built with [`AccelaClient::resource`], which
/// applies the same tenant checks as the built-in catalog. Handles are
/// cheap to construct, so nothing is cached per client.
///
/// ```rust,ignore
/// struct Agencies(AccelaClient);
///
/// impl ApiResource for Agencies {
///     const NAME: &'static str = "Agencies";
///     const REQUIRES_AGENCY: bool = false;
///     const REQUIRES_ENVIRONMENT: bool = false;
///
///     fn new(client: AccelaClient) -> Self {
///         Self(client)
///     }
///
///     fn client(&self) -> &AccelaClient {
///         &self.0
///     }
/// }
///
/// let agencies = client.resource::<Agencies>()?;
/// ```
pub trait ApiResource: Sized {
    /// Name used in error messages
    const NAME: &'static str;

    /// Needs the `x-accela-agency` header
    const REQUIRES_AGENCY: bool = true;

    /// Needs the `x-accela-environment` header
    const REQUIRES_ENVIRONMENT: bool = true;

    /// Wrap a client without checking requirements
    fn new(client: AccelaClient) -> Self;

    /// The client this handle issues requests through
    fn client(&self) -> &AccelaClient;
}

#[cfg(test)]
mod tests;
