//! Error types for the Hackaday.io example server

use std::io;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::web::pages;

/// Result type alias for the example server
pub type Result<T> = std::result::Result<T, Error>;

/// Example server errors
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token endpoint answered with something other than 200
    #[error("Token exchange failed: HTTP {status}")]
    UpstreamAuth {
        /// Status returned by the token endpoint
        status: reqwest::StatusCode,
        /// Raw response body, echoed back to the browser
        body: String,
    },

    /// Token endpoint answered 200 without a usable `access_token`
    #[error("no token found")]
    MissingToken,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status used when this error is rendered for the browser.
    ///
    /// Failures the provider reported to us are shown on a 200 page, the way
    /// the original demo did. Anything else is a gateway or server fault.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UpstreamAuth { .. } | Self::MissingToken => StatusCode::OK,
            Self::Http(_) | Self::Json(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed inside the error page
    fn page_message(&self) -> String {
        match self {
            Self::UpstreamAuth { body, .. } => body.clone(),
            Self::MissingToken => self.to_string(),
            Self::Http(_) | Self::Json(_) => "upstream request failed".to_string(),
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_success() {
            warn!(error = %self, "OAuth callback rejected by provider");
        } else {
            error!(error = %self, status = %status, "OAuth callback failed");
        }

        (status, Html(pages::error_page(&self.page_message()))).into_response()
    }
}
