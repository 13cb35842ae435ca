//! Client configuration
//!
//! A [`ClientConfig`] can be written as YAML or read from `ACCELA_*`
//! environment variables.
//!
//! ```yaml
//! access_token: "eyJ..."
//! agency: ISLANDTON
//! environment: TEST
//! timezone: America/Los_Angeles
//! http:
//!   timeout_seconds: 60
//! ```

use crate::client::DEFAULT_BASE_URL;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the access token
pub const ENV_ACCESS_TOKEN: &str = "ACCELA_ACCESS_TOKEN";
/// Environment variable holding the agency
pub const ENV_AGENCY: &str = "ACCELA_AGENCY";
/// Environment variable holding the environment
pub const ENV_ENVIRONMENT: &str = "ACCELA_ENVIRONMENT";
/// Environment variable holding the IANA zone name
pub const ENV_TIMEZONE: &str = "ACCELA_TIMEZONE";
/// Environment variable overriding the API root
pub const ENV_BASE_URL: &str = "ACCELA_BASE_URL";

// ============================================================================
// Client Config
// ============================================================================

/// Everything needed to build an [`AccelaClient`](crate::AccelaClient)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// OAuth access token
    pub access_token: String,

    /// Agency name
    #[serde(default)]
    pub agency: Option<String>,

    /// Agency environment
    #[serde(default)]
    pub environment: Option<String>,

    /// IANA zone for naive API timestamps (e.g. "America/Chicago")
    #[serde(default)]
    pub timezone: Option<String>,

    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP settings
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    /// Config with only an access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            agency: None,
            environment: None,
            timezone: None,
            base_url: default_base_url(),
            http: HttpConfig::default(),
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Read `ACCELA_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let access_token = get(ENV_ACCESS_TOKEN)
            .ok_or_else(|| Error::config(format!("{ENV_ACCESS_TOKEN} is not set")))?;

        let config = Self {
            access_token,
            agency: get(ENV_AGENCY),
            environment: get(ENV_ENVIRONMENT),
            timezone: get(ENV_TIMEZONE),
            base_url: get(ENV_BASE_URL).unwrap_or_else(default_base_url),
            http: HttpConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parsed time zone
    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| Error::config(format!("Unknown time zone '{name}': {e}")))
            })
            .transpose()
    }

    /// Transport settings for this config
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.http.timeout_seconds));
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(Error::config("access_token must not be empty"));
        }
        self.timezone()?;
        Ok(())
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Custom user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}
