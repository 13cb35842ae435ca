//! Accela API client
//!
//! [`AccelaClient`] carries the authentication context (access token, agency,
//! environment, time zone) and the transport. It is cheap to clone; resource
//! handles and list responses keep their own clone for follow-up requests.

use crate::config::ClientConfig;
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::http::{ApiRequest, QueryParams, ReqwestTransport, Transport};
use crate::pagination::ListResponse;
use crate::resources::{
    ApiResource, MyRecords, RecordActivities, RecordWorkflowTaskHistories, Records,
};
use crate::types::{JsonValue, Method};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://apis.accela.com/v4";

/// Header scoping a request to an agency
pub const AGENCY_HEADER: &str = "x-accela-agency";

/// Header scoping a request to an agency environment
pub const ENVIRONMENT_HEADER: &str = "x-accela-environment";

/// Response headers worth logging when a request fails
const DIAGNOSTIC_HEADERS: &[&str] = &[
    "x-accela-traceid",
    "x-accela-resp-message",
    "x-ratelimit-limit",
    "x-ratelimit-remaining",
    "x-ratelimit-reset",
];

struct ClientInner {
    access_token: String,
    agency: Option<String>,
    environment: Option<String>,
    timezone: Option<Tz>,
    base_url: String,
    transport: Arc<dyn Transport>,
}

/// Client for the Accela Civic Platform API
#[derive(Clone)]
pub struct AccelaClient {
    inner: Arc<ClientInner>,
}

impl AccelaClient {
    /// Create a client with only an access token and the default transport
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::builder(access_token).build()
    }

    /// Start building a client
    pub fn builder(access_token: impl Into<String>) -> AccelaClientBuilder {
        AccelaClientBuilder::new(access_token)
    }

    /// Create a client from a loaded configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_config(config.http_client_config())?;

        let mut builder = Self::builder(config.access_token.clone())
            .base_url(config.base_url.clone())
            .transport(Arc::new(transport));

        if let Some(agency) = &config.agency {
            builder = builder.agency(agency.clone());
        }
        if let Some(environment) = &config.environment {
            builder = builder.environment(environment.clone());
        }
        if let Some(zone) = config.timezone()? {
            builder = builder.timezone(zone);
        }

        builder.build()
    }

    /// Configured agency
    pub fn agency(&self) -> Option<&str> {
        self.inner.agency.as_deref()
    }

    /// Configured environment
    pub fn environment(&self) -> Option<&str> {
        self.inner.environment.as_deref()
    }

    /// Zone used to interpret naive timestamps
    pub fn timezone(&self) -> Option<Tz> {
        self.inner.timezone
    }

    /// API root URL
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Headers sent with every request
    ///
    /// Tenant headers are only present when configured.
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), self.inner.access_token.clone());

        if let Some(agency) = self.agency().filter(|a| !a.is_empty()) {
            headers.insert(AGENCY_HEADER.to_string(), agency.to_string());
        }
        if let Some(environment) = self.environment().filter(|e| !e.is_empty()) {
            headers.insert(ENVIRONMENT_HEADER.to_string(), environment.to_string());
        }

        headers
    }

    /// Build an absolute URL from path segments, escaping each segment
    pub fn url(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.inner.base_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("Base URL cannot be a base: {}", self.base_url())))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Construct a resource handle, checking its tenant requirements first
    pub fn resource<R: ApiResource>(&self) -> Result<R> {
        self.ensure_requirements::<R>()?;
        Ok(R::new(self.clone()))
    }

    /// Check that this client carries the tenant attributes `R` needs
    pub fn ensure_requirements<R: ApiResource>(&self) -> Result<()> {
        if R::REQUIRES_AGENCY && self.agency().map_or(true, str::is_empty) {
            return Err(Error::MissingTenant {
                resource: R::NAME,
                attribute: "agency",
            });
        }
        if R::REQUIRES_ENVIRONMENT && self.environment().map_or(true, str::is_empty) {
            return Err(Error::MissingTenant {
                resource: R::NAME,
                attribute: "environment",
            });
        }
        Ok(())
    }

    /// Records
    pub fn records(&self) -> Result<Records> {
        self.resource()
    }

    /// Records of the authenticated user
    pub fn my_records(&self) -> Result<MyRecords> {
        self.resource()
    }

    /// Activities of a record
    pub fn record_activities(&self) -> Result<RecordActivities> {
        self.resource()
    }

    /// Workflow task histories of a record
    pub fn record_workflow_task_histories(&self) -> Result<RecordWorkflowTaskHistories> {
        self.resource()
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Make a GET request and return the JSON body
    pub async fn get(&self, url: &str, query: QueryParams) -> Result<JsonValue> {
        self.request(Method::GET, url, query, None).await
    }

    /// Make a POST request with a JSON body and return the JSON response
    pub async fn post(
        &self,
        url: &str,
        body: Option<JsonValue>,
        query: QueryParams,
    ) -> Result<JsonValue> {
        self.request(Method::POST, url, query, body).await
    }

    /// Make a request with any method
    ///
    /// Only GET and POST are supported; other methods fail before any I/O.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        query: QueryParams,
        body: Option<JsonValue>,
    ) -> Result<JsonValue> {
        let request = ApiRequest::new(method, url)
            .with_query(query)
            .with_body(body);
        self.execute(request).await
    }

    /// Issue a list request and wrap the first page
    pub async fn list<E: Entity>(
        &self,
        request: ApiRequest,
        result_key: &'static str,
    ) -> Result<ListResponse<E>> {
        ListResponse::fetch(self.clone(), request, result_key).await
    }

    /// Send a request with the authentication headers attached
    pub(crate) async fn execute(&self, mut request: ApiRequest) -> Result<JsonValue> {
        if !request.method.is_supported() {
            return Err(Error::UnsupportedMethod {
                method: request.method.to_string(),
            });
        }

        for (key, value) in self.headers() {
            request.headers.entry(key).or_insert(value);
        }

        debug!(
            method = %request.method,
            url = %request.url,
            params = request.query.len(),
            "Sending Accela request"
        );

        let method = request.method;
        let url = request.url.clone();

        match self.inner.transport.send(request).await {
            Ok(response) => Ok(response.body),
            Err(err) => {
                log_failure(method, &url, &err);
                Err(err)
            }
        }
    }
}

fn log_failure(method: Method, url: &str, err: &Error) {
    if let Error::HttpStatus {
        status,
        body,
        headers,
    } = err
    {
        let diagnostics: Vec<String> = DIAGNOSTIC_HEADERS
            .iter()
            .filter_map(|name| headers.get(*name).map(|value| format!("{name}={value}")))
            .collect();

        error!(
            %method,
            url,
            status,
            body = %body,
            headers = %diagnostics.join(" "),
            "Accela API request failed"
        );
    } else {
        error!(%method, url, error = %err, "Accela API request failed");
    }
}

impl fmt::Debug for AccelaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccelaClient")
            .field("base_url", &self.inner.base_url)
            .field("agency", &self.inner.agency)
            .field("environment", &self.inner.environment)
            .field("timezone", &self.inner.timezone)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AccelaClient`]
pub struct AccelaClientBuilder {
    access_token: String,
    agency: Option<String>,
    environment: Option<String>,
    timezone: Option<Tz>,
    base_url: String,
    transport: Option<Arc<dyn Transport>>,
}

impl AccelaClientBuilder {
    fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            agency: None,
            environment: None,
            timezone: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: None,
        }
    }

    /// Agency name, e.g. `CHARLOTTE`
    #[must_use]
    pub fn agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = Some(agency.into());
        self
    }

    /// Environment name, e.g. `PROD`
    #[must_use]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Zone used to interpret naive API timestamps
    #[must_use]
    pub fn timezone(mut self, zone: Tz) -> Self {
        self.timezone = Some(zone);
        self
    }

    /// Override the API root
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use a custom transport
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AccelaClient> {
        Url::parse(&self.base_url)?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        Ok(AccelaClient {
            inner: Arc::new(ClientInner {
                access_token: self.access_token,
                agency: self.agency,
                environment: self.environment,
                timezone: self.timezone,
                base_url: self.base_url,
                transport,
            }),
        })
    }
}
