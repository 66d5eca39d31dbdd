//! Hackaday.io OAuth example
//!
//! A small web application showing the Hackaday.io OAuth 2.0 Authorization
//! Code flow from the server side.
//!
//! # Endpoints
//!
//! - `GET /` - page with an "Authorize this app" link
//! - `GET /authorize` - redirect straight to the consent screen
//! - `GET /oauth-callback` - exchange the code for a token and return
//!   `/v1/projects` as JSON

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod oauth;
pub mod web;

pub use error::{Error, Result};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    let init = match format {
        Some("json") => subscriber.with(fmt::layer().json()).try_init(),
        _ => subscriber.with(fmt::layer()).try_init(),
    };

    init.map_err(|e| Error::Internal(format!("Failed to initialize tracing: {e}")))
}
