//! Dev server: proxied API prefixes plus the built SPA with history fallback.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::DevProxy;
use crate::config::Config;

/// Shared dev server state
#[derive(Clone)]
pub struct DevServerState {
    pub proxy: Arc<DevProxy>,
    pub static_files: ServeDir<ServeFile>,
}

impl DevServerState {
    pub fn new(proxy: DevProxy, dist_dir: &Path) -> Self {
        // Unknown paths get index.html so client-side routes survive a reload
        let static_files =
            ServeDir::new(dist_dir).fallback(ServeFile::new(dist_dir.join("index.html")));
        Self {
            proxy: Arc::new(proxy),
            static_files,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let proxy = DevProxy::from_config(&config.proxy)?;
        Ok(Self::new(proxy, &config.dist_dir))
    }
}

pub fn router(state: DevServerState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dispatch(State(state): State<DevServerState>, request: Request) -> Response {
    let path = request.uri().path().to_string();
    if let Some(rule) = state.proxy.match_rule(&path) {
        return match state.proxy.forward(rule, request).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        };
    }

    match state.static_files.oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}

/// Bind `config.port` and serve until the process is stopped.
pub async fn serve(config: &Config) -> Result<()> {
    let state = DevServerState::from_config(config)?;
    for rule in state.proxy.rules() {
        tracing::info!(prefix = rule.prefix(), target = %rule.target(), "proxy rule active");
    }
    tracing::info!(dist_dir = %config.dist_dir.display(), "serving SPA");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
