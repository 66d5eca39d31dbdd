//! Hackaday.io API client
//!
//! Performs the two outbound calls of the authorization code flow: the
//! code-for-token exchange and the projects fetch made with that token.

use std::fmt;

use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ProviderConfig;
use crate::{Error, Result};

/// Bearer credential returned by the token endpoint
///
/// Lives for a single callback request and is never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Value of the `Authorization` header expected by the API
    fn authorization_header(&self) -> String {
        format!("token {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Body returned by the API, passed through untouched
#[derive(Debug)]
pub struct ApiResponse {
    /// Status reported by the API (not propagated to the browser)
    pub status: StatusCode,
    /// Raw response body
    pub body: String,
}

/// Client for the Hackaday.io identity provider and REST API
pub struct HackadayClient {
    /// HTTP client shared across requests
    http_client: Client,

    /// Credentials and endpoints
    provider: ProviderConfig,
}

impl HackadayClient {
    /// Create a client for the given provider configuration
    #[must_use]
    pub fn new(http_client: Client, provider: ProviderConfig) -> Self {
        Self {
            http_client,
            provider,
        }
    }

    /// URL the browser is sent to for user consent
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authorization endpoint is not a URL.
    pub fn authorize_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.provider.authorize_url)
            .map_err(|e| Error::Config(format!("Invalid auth endpoint: {e}")))?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.provider.client_id)
            .append_pair("response_type", "code");

        Ok(url)
    }

    /// Exchange an authorization code for an access token
    ///
    /// The code is forwarded as given, including an empty one.
    ///
    /// # Errors
    ///
    /// - [`Error::UpstreamAuth`] if the token endpoint does not answer 200
    /// - [`Error::MissingToken`] if the response has no non-empty `access_token`
    /// - [`Error::Http`] / [`Error::Json`] on transport or decoding failures
    pub async fn exchange_code(&self, code: &str) -> Result<AccessToken> {
        let response = self
            .http_client
            .post(&self.provider.token_url)
            .query(&[
                ("client_id", self.provider.client_id.as_str()),
                ("client_secret", self.provider.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            warn!(status = %status, "Token endpoint refused the authorization code");
            return Err(Error::UpstreamAuth { status, body });
        }

        let token_response: TokenResponse = serde_json::from_str(&body)?;

        match token_response.access_token {
            Some(token) if !token.is_empty() => {
                info!("Exchanged authorization code for access token");
                Ok(AccessToken(token))
            }
            _ => Err(Error::MissingToken),
        }
    }

    /// Fetch the projects list on behalf of the token holder
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the request cannot be completed.
    pub async fn fetch_projects(&self, token: &AccessToken) -> Result<ApiResponse> {
        let url = format!("{}/projects", self.provider.api_url.trim_end_matches('/'));

        let response = self
            .http_client
            .get(&url)
            .header(AUTHORIZATION, token.authorization_header())
            .query(&[("api_key", self.provider.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            debug!(url = %url, bytes = body.len(), "Fetched projects");
        } else {
            // Body is still forwarded as-is.
            warn!(url = %url, status = %status, "Projects request returned an error status");
        }

        Ok(ApiResponse { status, body })
    }
}
