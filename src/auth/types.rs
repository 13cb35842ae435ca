//! Token exchange types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Accela token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://apis.accela.com/oauth2/token";

/// Seconds before expiry at which a token is treated as expired
const EXPIRY_BUFFER_SECS: i64 = 30;

/// Resource-owner password grant parameters
#[derive(Clone)]
pub struct PasswordGrant {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    /// Agency the user signs in to
    pub agency_name: String,
    /// Agency environment, e.g. `PROD`
    pub environment: String,
    /// Grant type, `password` unless the app is set up otherwise
    pub grant_type: String,
    /// Space-separated scopes
    pub scope: String,
    /// Identity provider for federated sign-in
    pub id_provider: Option<String>,
}

impl PasswordGrant {
    /// Create a password grant with no identity provider
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        agency_name: impl Into<String>,
        environment: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
            agency_name: agency_name.into(),
            environment: environment.into(),
            grant_type: "password".to_string(),
            scope: scope.into(),
            id_provider: None,
        }
    }

    /// Sign in through an identity provider
    #[must_use]
    pub fn id_provider(mut self, provider: impl Into<String>) -> Self {
        self.id_provider = Some(provider.into());
        self
    }

    pub(crate) fn form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("client_id", self.client_id.clone()),
            ("client_secret", self.client_secret.clone()),
            ("username", self.username.clone()),
            ("password", self.password.clone()),
            ("agency_name", self.agency_name.clone()),
            ("environment", self.environment.clone()),
            ("grant_type", self.grant_type.clone()),
            ("scope", self.scope.clone()),
        ];
        if let Some(provider) = self.id_provider.as_ref().filter(|p| !p.is_empty()) {
            form.push(("id_provider", provider.clone()));
        }
        form
    }
}

impl fmt::Debug for PasswordGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordGrant")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("agency_name", &self.agency_name)
            .field("environment", &self.environment)
            .field("grant_type", &self.grant_type)
            .field("scope", &self.scope)
            .field("id_provider", &self.id_provider)
            .finish_non_exhaustive()
    }
}

/// An issued access token
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Value for the `Authorization` header
    pub access_token: String,
    pub refresh_token: String,
    /// Request start plus the granted lifetime
    pub expires_at: DateTime<Utc>,
    pub scopes: BTreeSet<String>,
}

impl AccessToken {
    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check expiry against a given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_BUFFER_SECS) >= self.expires_at
    }

    /// Whether the token was granted `scope`
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("expires_at", &self.expires_at)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Lifetime,
    #[serde(default)]
    pub scope: String,
}

/// `expires_in` arrives as a number or a numeric string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Lifetime {
    Seconds(i64),
    Text(String),
}

impl Lifetime {
    pub(crate) fn seconds(&self) -> Option<i64> {
        match self {
            Lifetime::Seconds(secs) => Some(*secs),
            Lifetime::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl TokenResponse {
    /// Build the token, anchoring expiry at `issued_at`
    pub(crate) fn into_access_token(self, issued_at: DateTime<Utc>) -> Option<AccessToken> {
        let lifetime = self.expires_in.seconds()?;
        Some(AccessToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: issued_at + Duration::seconds(lifetime),
            scopes: self.scope.split_whitespace().map(str::to_string).collect(),
        })
    }
}
