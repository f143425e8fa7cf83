//! Preconfigured HTTP client for the game backend.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use super::ApiConfig;

/// Errors surfaced by [`ApiClient`]. Nothing is retried or swallowed here.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {detail}")]
    Status { status: StatusCode, detail: String },
}

impl ApiError {
    /// HTTP status for `Status` errors, `None` for transport failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status(),
            ApiError::InvalidUrl { .. } => None,
        }
    }
}

/// Error body the backend sends with 4xx/5xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Shared, immutable request issuer.
///
/// Cloning is cheap and shares the underlying connection pool, so the same
/// instance can be handed to every view.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Use a caller-built `reqwest::Client` (custom timeouts, cookie store, ...).
    pub fn with_client(config: &ApiConfig, http: Client) -> Self {
        tracing::debug!(base_url = %config.base_url, "API client configured");
        Self {
            base_url: config.base_url.clone(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `path` under the configured base.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        resolve_url(&self.base_url, path)
    }

    /// Start a request. Headers, timeouts and bodies are up to the caller.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        Ok(self.http.request(method, url))
    }

    pub fn get(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        self.request(Method::PUT, path)
    }

    pub fn patch(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        self.request(Method::PATCH, path)
    }

    pub fn delete(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        self.request(Method::DELETE, path)
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(self.get(path)?).await
    }

    /// GET `path` with query parameters and decode the JSON body.
    pub async fn get_json_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.get(path)?.query(query)).await
    }

    /// POST a JSON body to `path` and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.post(path)?.json(body)).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Turn a non-2xx response into [`ApiError::Status`].
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if text.is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => text,
    };

    tracing::debug!(%status, %detail, "backend request rejected");
    Err(ApiError::Status { status, detail })
}

/// Join a request path onto a base URL.
///
/// Exactly one `/` separates base and path, so a base with a path prefix
/// (`http://host/api`) keeps it. A path that is already an absolute URL is
/// used as-is. A relative base such as `/api` (same-origin, behind the dev
/// proxy) is resolved against the page origin on wasm32 and against
/// `http://localhost` elsewhere.
pub fn resolve_url(base: &str, path: &str) -> Result<Url, ApiError> {
    let joined = if is_absolute_url(path) || base.is_empty() {
        path.to_string()
    } else if path.is_empty() {
        base.to_string()
    } else {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };

    let parsed = match Url::parse(&joined) {
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&page_origin())
            .and_then(|origin| origin.join(&joined)),
        other => other,
    };

    parsed.map_err(|source| ApiError::InvalidUrl {
        url: joined,
        source,
    })
}

fn is_absolute_url(path: &str) -> bool {
    if path.starts_with("//") {
        return true;
    }
    match path.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_else(|| "http://localhost".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> String {
    "http://localhost".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(&ApiConfig::default())
    }

    #[test]
    fn test_relative_path_gets_base_url() {
        let url = client().url("/foo").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/foo");
    }

    #[test]
    fn test_base_url_applied_once_per_call() {
        let client = client();
        for _ in 0..5 {
            assert_eq!(client.url("/foo").unwrap().as_str(), "http://localhost:9000/foo");
        }
        assert_eq!(client.base_url(), "http://localhost:9000");
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_base_url() {
        let client = client();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let client = client.clone();
                tokio::spawn(async move { client.url("/foo").map(|u| u.to_string()) })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "http://localhost:9000/foo");
        }
    }

    #[test]
    fn test_slashes_are_normalized() {
        let cases = [
            ("http://localhost:9000/", "/foo", "http://localhost:9000/foo"),
            ("http://localhost:9000", "foo", "http://localhost:9000/foo"),
            ("http://backend/api/", "/room/info", "http://backend/api/room/info"),
            ("http://backend/api", "room/info", "http://backend/api/room/info"),
        ];
        for (base, path, expected) in cases {
            assert_eq!(resolve_url(base, path).unwrap().as_str(), expected, "{base} + {path}");
        }
    }

    #[test]
    fn test_absolute_url_overrides_base() {
        let url = resolve_url("http://localhost:9000", "https://cdn.example.com/a.png").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_query_string_is_kept() {
        let url = client().url("/room/info?room_id=ABC123").unwrap();
        assert_eq!(url.path(), "/room/info");
        assert_eq!(url.query(), Some("room_id=ABC123"));
    }

    #[test]
    fn test_relative_base_resolves_against_origin() {
        let url = resolve_url("/api", "/login").unwrap();
        assert_eq!(url.path(), "/api/login");
    }

    #[test]
    fn test_invalid_base_is_reported() {
        let err = resolve_url("http://[::1", "/foo").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_verb_methods_target_joined_url() {
        let client = client();
        let request = client.post("/login").unwrap().build().unwrap();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.url().as_str(), "http://localhost:9000/login");

        let request = client.delete("/room/1").unwrap().build().unwrap();
        assert_eq!(request.method(), &Method::DELETE);
    }
}
