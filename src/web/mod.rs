//! Web server: link page, authorize redirect and OAuth callback

pub mod pages;
mod router;
mod server;

pub use router::{AppState, CALLBACK_PATH, create_router};
pub use server::Server;
