//! Card game web client
//!
//! This library provides:
//! - The routed Dioxus single-page app (auth, dashboard, rooms, game, records, admin)
//! - A preconfigured backend API client shared by all views
//! - A development server that proxies `/api` to the backend (server feature only)

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI app (compiled to WASM, route table testable natively)
pub mod app;

// Backend API client (shared - reqwest uses fetch on WASM)
pub mod api;

// Dev-only modules (excluded from WASM build)
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod proxy;
