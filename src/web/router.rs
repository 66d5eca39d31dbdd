//! HTTP router and handlers

use std::sync::Arc;

use axum::{
    Router,
    extract::{RawQuery, State},
    http::header::CONTENT_TYPE,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use reqwest::Client;
use tower_http::trace::TraceLayer;
use tracing::debug;
use url::form_urlencoded;

use super::pages;
use crate::config::ProviderConfig;
use crate::oauth::HackadayClient;
use crate::Result;

/// Path the provider redirects the browser back to
pub const CALLBACK_PATH: &str = "/oauth-callback";

/// Shared application state
pub struct AppState {
    /// Provider client
    pub client: HackadayClient,
    /// Consent URL, computed once at startup
    pub authorize_url: String,
}

impl AppState {
    /// Build application state from the provider configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the
    /// authorization endpoint is not a valid URL.
    pub fn new(provider: ProviderConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let client = HackadayClient::new(http_client, provider);
        let authorize_url = client.authorize_url()?.to_string();

        Ok(Self {
            client,
            authorize_url,
        })
    }
}

/// Authorization code from the callback query string
///
/// A repeated `code` resolves to the last value; a missing one is empty.
fn callback_code(query: Option<&str>) -> String {
    query
        .map(|q| form_urlencoded::parse(q.as_bytes()))
        .and_then(|pairs| pairs.filter(|(key, _)| key == "code").last())
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/authorize", get(authorize_handler))
        .route(CALLBACK_PATH, get(callback_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - link to the consent screen
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::link_page(&state.authorize_url))
}

/// GET /authorize - send the browser straight to the consent screen
async fn authorize_handler(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::to(&state.authorize_url)
}

/// GET /oauth-callback - exchange the code and proxy the projects list
async fn callback_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    // A missing code is forwarded as empty; the provider rejects it.
    let code = callback_code(query.as_deref());
    debug!(code_present = !code.is_empty(), "Received OAuth callback");

    let token = state.client.exchange_code(&code).await?;
    let projects = state.client.fetch_projects(&token).await?;

    Ok(([(CONTENT_TYPE, "application/json")], projects.body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_code_reads_query_string() {
        assert_eq!(callback_code(Some("code=abc123&state=xyz")), "abc123");
        assert_eq!(callback_code(Some("code=a%2Bb")), "a+b");
        assert_eq!(callback_code(Some("state=xyz")), "");
        assert_eq!(callback_code(None), "");
    }

    #[test]
    fn callback_code_takes_last_of_repeated_values() {
        assert_eq!(callback_code(Some("code=first&code=second")), "second");
    }

    #[test]
    fn state_precomputes_authorize_url() {
        let provider = ProviderConfig {
            client_id: "abc".to_string(),
            ..ProviderConfig::default()
        };
        let state = AppState::new(provider).unwrap();
        assert_eq!(
            state.authorize_url,
            "http://hackaday.io/authorize?client_id=abc&response_type=code"
        );
    }
}
