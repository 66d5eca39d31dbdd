//! OAuth 2.0 client for Hackaday.io
//!
//! Implements the server side of the Authorization Code flow:
//! building the consent URL, exchanging the returned code for an access
//! token, and calling the API with that token.
//!
//! Tokens are used once and dropped. There is no storage or refresh.

mod client;

pub use client::{AccessToken, ApiResponse, HackadayClient};
