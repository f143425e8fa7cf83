//! Development proxy.
//!
//! Forwards `/api/...` calls from the SPA to the backend so the app can use
//! same-origin relative URLs while the backend listens elsewhere. Only the
//! `dev-server` binary uses this; it is never part of the wasm bundle.

mod server;

pub use server::{router, serve, DevServerState};

use std::borrow::Cow;

use axum::body::Body;
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use http_body_util::BodyExt;
use regex::Regex;
use tracing::{debug, warn};
use url::Url;

use crate::config::ProxyConfig;

/// Headers that describe a single connection and must not be forwarded.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid proxy target {target}: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid path rewrite pattern {pattern}: {source}")]
    InvalidRewrite {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("could not build upstream URL {0}")]
    UpstreamUrl(String),

    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("failed to build response: {0}")]
    Response(#[from] axum::http::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        warn!(error = %self, "proxy request failed");
        (StatusCode::BAD_GATEWAY, format!("proxy error: {self}")).into_response()
    }
}

/// A prefix-matched forwarding rule.
#[derive(Debug, Clone)]
pub struct ProxyRule {
    prefix: String,
    target: Url,
    change_origin: bool,
    path_rewrite: Vec<(Regex, String)>,
}

impl ProxyRule {
    pub fn new(prefix: impl Into<String>, target: &str) -> Result<Self, ProxyError> {
        let target = Url::parse(target).map_err(|source| ProxyError::InvalidTarget {
            target: target.to_string(),
            source,
        })?;
        Ok(Self {
            prefix: prefix.into(),
            target,
            change_origin: false,
            path_rewrite: Vec::new(),
        })
    }

    pub fn from_config(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let mut rule = Self::new(config.prefix.clone(), &config.target)?
            .change_origin(config.change_origin);
        for rewrite in &config.path_rewrite {
            rule = rule.rewrite(&rewrite.pattern, &rewrite.replacement)?;
        }
        Ok(rule)
    }

    pub fn change_origin(mut self, enabled: bool) -> Self {
        self.change_origin = enabled;
        self
    }

    /// Add a path rewrite. Rewrites are tried in the order they were added.
    pub fn rewrite(mut self, pattern: &str, replacement: &str) -> Result<Self, ProxyError> {
        let regex = Regex::new(pattern).map_err(|source| ProxyError::InvalidRewrite {
            pattern: pattern.to_string(),
            source,
        })?;
        self.path_rewrite.push((regex, replacement.to_string()));
        Ok(self)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    /// Plain string-prefix match, so `/api` also matches `/apifoo`.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Apply the first matching rewrite to a path (with query), always
    /// returning an absolute path.
    pub fn rewrite_path(&self, path_and_query: &str) -> String {
        let mut path = self
            .path_rewrite
            .iter()
            .find(|(regex, _)| regex.is_match(path_and_query))
            .map(|(regex, replacement)| regex.replace(path_and_query, replacement.as_str()))
            .unwrap_or(Cow::Borrowed(path_and_query))
            .into_owned();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        path
    }

    /// Upstream URL for an incoming path: target path + rewritten request path.
    pub fn upstream_url(&self, path_and_query: &str) -> Result<Url, ProxyError> {
        let rewritten = self.rewrite_path(path_and_query);
        let base = self.target.as_str().trim_end_matches('/');
        let joined = format!("{base}{rewritten}");
        Url::parse(&joined).map_err(|_| ProxyError::UpstreamUrl(joined))
    }

    /// Serialized origin of the target, e.g. `http://localhost:9000`.
    pub fn target_origin(&self) -> String {
        self.target.origin().ascii_serialization()
    }

    /// Request headers to send upstream.
    pub fn upstream_headers(&self, incoming: &HeaderMap) -> HeaderMap {
        let mut headers = strip_hop_by_hop(incoming);
        if self.change_origin {
            // reqwest fills in Host from the upstream URL
            headers.remove(header::HOST);
            if let Ok(origin) = HeaderValue::from_str(&self.target_origin()) {
                headers.insert(header::ORIGIN, origin);
            }
        }
        headers
    }
}

fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for name in &HOP_BY_HOP {
        out.remove(name);
    }
    out
}

/// Proxy rules plus the shared upstream client.
#[derive(Debug, Clone)]
pub struct DevProxy {
    rules: Vec<ProxyRule>,
    client: reqwest::Client,
}

impl DevProxy {
    pub fn new(rules: Vec<ProxyRule>) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            // Let the browser see upstream redirects as-is
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(ProxyError::Client)?;
        Ok(Self { rules, client })
    }

    pub fn from_config(config: &ProxyConfig) -> Result<Self, ProxyError> {
        Self::new(vec![ProxyRule::from_config(config)?])
    }

    pub fn rules(&self) -> &[ProxyRule] {
        &self.rules
    }

    /// First rule whose prefix matches `path`.
    pub fn match_rule(&self, path: &str) -> Option<&ProxyRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    /// Forward `request` upstream according to `rule` and relay the response.
    pub async fn forward(
        &self,
        rule: &ProxyRule,
        request: Request<Body>,
    ) -> Result<Response, ProxyError> {
        let (parts, body) = request.into_parts();
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let url = rule.upstream_url(path_and_query)?;
        debug!(method = %parts.method, from = %path_and_query, to = %url, "proxying request");

        let body = body.collect().await?.to_bytes();
        let upstream = self
            .client
            .request(parts.method, url)
            .headers(rule.upstream_headers(&parts.headers))
            .body(body)
            .send()
            .await?;

        let status = upstream.status();
        let headers = strip_hop_by_hop(upstream.headers());
        let mut response = Response::builder()
            .status(status)
            .body(Body::from_stream(upstream.bytes_stream()))?;
        *response.headers_mut() = headers;
        Ok(response)
    }
}
