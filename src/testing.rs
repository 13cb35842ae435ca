//! In-memory transport for unit tests

use crate::client::AccelaClient;
use crate::error::{Error, Result};
use crate::http::{ApiRequest, ApiResponse, Transport};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays scripted responses and records every request it receives
///
/// Once the script runs out it answers `{}`.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push_json(&self, body: JsonValue) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::ok(body)));
    }

    pub(crate) fn push_error(&self, err: Error) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::ok(serde_json::json!({}))))
    }
}

/// Client wired to `transport` with agency `TESTAGENCY`, environment `TEST`
pub(crate) fn tenant_client(transport: &Arc<FakeTransport>) -> AccelaClient {
    AccelaClient::builder("test-token")
        .agency("TESTAGENCY")
        .environment("TEST")
        .base_url("https://apis.example.com/v4")
        .transport(transport.clone())
        .build()
        .unwrap()
}
