//! Error types for the Accela client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Nothing in this crate retries; every variant reaches the caller.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A wire timestamp that did not match `YYYY-MM-DD HH:MM:SS`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid timestamp '{value}': expected YYYY-MM-DD HH:MM:SS")]
pub struct FormatError {
    /// The offending wire value
    pub value: String,
    #[source]
    source: chrono::ParseError,
}

impl FormatError {
    pub(crate) fn new(value: impl Into<String>, source: chrono::ParseError) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }
}

/// Body of a failed API response, parsed as JSON when possible
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body parsed as JSON
    Json(serde_json::Value),
    /// Body that was not valid JSON
    Text(String),
}

impl ResponseBody {
    /// Parse a raw body, falling back to text
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// The main error type for the Accela client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{resource} requires an {attribute}; configure the client with one before using it")]
    MissingTenant {
        resource: &'static str,
        attribute: &'static str,
    },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("OAuth2 error (HTTP {status}): {message}")]
    OAuth2 {
        status: u16,
        message: String,
        body: ResponseBody,
    },

    #[error("Token refresh failed (HTTP {status}): {message}")]
    TokenRefresh {
        status: u16,
        message: String,
        body: ResponseBody,
    },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: u16,
        body: ResponseBody,
        headers: BTreeMap<String, String>,
    },

    #[error("Method {method} is not currently supported")]
    UnsupportedMethod { method: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode {entity}.{field}: {source}")]
    Decode {
        entity: &'static str,
        field: &'static str,
        #[source]
        source: FormatError,
    },

    #[error("Unexpected response shape: {message}")]
    UnexpectedShape { message: String },

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unexpected shape error
    pub fn shape(message: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// HTTP status for API failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. }
            | Error::OAuth2 { status, .. }
            | Error::TokenRefresh { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error was raised before any request was sent
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Config { .. } | Error::MissingTenant { .. } | Error::UnsupportedMethod { .. }
        )
    }
}

/// Result type alias for the Accela client
pub type Result<T> = std::result::Result<T, Error>;
