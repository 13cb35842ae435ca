//! OAuth2 token exchange against the Accela token endpoint

use super::types::{AccessToken, PasswordGrant, TokenResponse, DEFAULT_TOKEN_URL};
use crate::error::{Error, ResponseBody, Result};
use crate::http::HttpClientConfig;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, error};

/// Client for the token endpoint
#[derive(Debug, Clone)]
pub struct TokenClient {
    http_client: Client,
    token_url: String,
}

impl TokenClient {
    /// Create a token client with default HTTP settings
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpClientConfig::default())
    }

    /// Create a token client with custom HTTP settings
    pub fn with_config(config: &HttpClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            http_client,
            token_url: DEFAULT_TOKEN_URL.to_string(),
        })
    }

    /// Override the token endpoint
    #[must_use]
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Exchange user credentials for an access token
    pub async fn fetch_access_token(&self, grant: &PasswordGrant) -> Result<AccessToken> {
        debug!(
            agency = %grant.agency_name,
            environment = %grant.environment,
            "Requesting access token"
        );

        self.exchange(&grant.form(), |status, message, body| Error::OAuth2 {
            status,
            message,
            body,
        })
        .await
    }

    /// Trade a refresh token for a new access token
    pub async fn refresh_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<AccessToken> {
        let form = [
            ("grant_type", "refresh_token".to_string()),
            ("client_id", client_id.to_string()),
            ("client_secret", client_secret.to_string()),
            ("refresh_token", refresh_token.to_string()),
        ];

        self.exchange(&form, |status, message, body| Error::TokenRefresh {
            status,
            message,
            body,
        })
        .await
    }

    async fn exchange(
        &self,
        form: &[(&'static str, String)],
        fail: impl Fn(u16, String, ResponseBody) -> Error,
    ) -> Result<AccessToken> {
        // Lifetime is measured from before the request goes out
        let issued_at = Utc::now();

        let response = self
            .http_client
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let code = status.as_u16();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            error!(status = code, body = %body, "Token request failed");
            return Err(fail(
                code,
                "Token request rejected".to_string(),
                ResponseBody::from_text(body),
            ));
        }

        let token_response: TokenResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                return Err(fail(
                    code,
                    format!("Malformed token response: {e}"),
                    ResponseBody::from_text(body),
                ))
            }
        };

        token_response.into_access_token(issued_at).ok_or_else(|| {
            fail(
                code,
                "Token response has a non-numeric expires_in".to_string(),
                ResponseBody::from_text(body),
            )
        })
    }
}

/// Exchange user credentials using the default token endpoint
pub async fn fetch_access_token(grant: &PasswordGrant) -> Result<AccessToken> {
    TokenClient::new()?.fetch_access_token(grant).await
}
