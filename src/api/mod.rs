//! Backend API access.
//!
//! One [`ApiClient`] is built at startup from an [`ApiConfig`] and handed to
//! the views through the Dioxus context. Everything that talks to the game
//! backend goes through it.

mod client;
mod endpoints;
pub mod models;

pub use client::{resolve_url, ApiClient, ApiError};
pub use endpoints::DEFAULT_GAME_MODE;

/// Backend origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";

/// Client-side API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Resolve the base URL baked in at build time.
    ///
    /// The wasm bundle has no process environment, so `CARD_GAME_API_BASE_URL`
    /// is read when the crate is compiled (e.g. `CARD_GAME_API_BASE_URL=/api dx build`).
    pub fn from_build_env() -> Self {
        Self::new(option_env!("CARD_GAME_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
