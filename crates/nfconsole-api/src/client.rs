// Async HTTP client for the configuration and subscriber APIs.
//
// Both surfaces live on the same server under different base paths:
//   config:     {server}/config/v1/...
//   subscriber: {server}/api/...
// Non-2xx answers carry plain text that is surfaced verbatim.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;

/// Default base path of the configuration API.
pub const DEFAULT_CONFIG_BASE: &str = "/config/v1";
/// Default base path of the subscriber API.
pub const DEFAULT_SUBSCRIBER_BASE: &str = "/api";

/// Which API surface a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSurface {
    /// Device groups, network slices and inventory.
    Config,
    /// K4 keys and subscriber credentials.
    Subscriber,
}

/// Base paths of the two API surfaces, relative to the server URL.
#[derive(Debug, Clone)]
pub struct BasePaths {
    pub config: String,
    pub subscriber: String,
}

impl Default for BasePaths {
    fn default() -> Self {
        Self {
            config: DEFAULT_CONFIG_BASE.into(),
            subscriber: DEFAULT_SUBSCRIBER_BASE.into(),
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client shared by every resource endpoint.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted, so the
/// TUI hands clones to background tasks.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config_base: Url,
    subscriber_base: Url,
    timeout_secs: u64,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `server` using the given transport settings.
    pub fn new(server: &str, paths: &BasePaths, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let mut client = Self::with_client(http, server, paths)?;
        client.timeout_secs = transport.timeout.as_secs();
        Ok(client)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, server: &str, paths: &BasePaths) -> Result<Self, Error> {
        let server = Url::parse(server)?;
        if server.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(server.to_string()));
        }
        Ok(Self {
            http,
            config_base: Self::join_base(&server, &paths.config),
            subscriber_base: Self::join_base(&server, &paths.subscriber),
            timeout_secs: 30,
        })
    }

    /// Append a base path to the server URL, normalizing slashes.
    fn join_base(server: &Url, base_path: &str) -> Url {
        let mut url = server.clone();
        let prefix = server.path().trim_end_matches('/');
        let base = base_path.trim_matches('/');
        if base.is_empty() {
            url.set_path(&format!("{prefix}/"));
        } else {
            url.set_path(&format!("{prefix}/{base}"));
        }
        url.set_query(None);
        url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build the URL for `segments` under the chosen surface.
    ///
    /// Segments are percent-encoded, so keys containing `/` or spaces stay
    /// a single path segment.
    pub fn url(&self, api: ApiSurface, segments: &[&str]) -> Url {
        let mut url = match api {
            ApiSurface::Config => self.config_base.clone(),
            ApiSurface::Subscriber => self.subscriber_base.clone(),
        };
        // Bases are checked in `with_client`, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, api: ApiSurface, segments: &[&str]) -> Result<T, Error> {
        let resp = self.send(Method::GET, api, segments, None::<&()>).await?;
        Self::handle_response(resp).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        api: ApiSurface,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.send(Method::POST, api, segments, Some(body)).await?;
        Self::handle_response(resp).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        api: ApiSurface,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.send(Method::PUT, api, segments, Some(body)).await?;
        Self::handle_response(resp).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, api: ApiSurface, segments: &[&str]) -> Result<T, Error> {
        let resp = self.send(Method::DELETE, api, segments, None::<&()>).await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        api: ApiSurface,
        segments: &[&str],
        body: &B,
    ) -> Result<(), Error> {
        let resp = self.send(Method::POST, api, segments, Some(body)).await?;
        Self::handle_empty(resp).await
    }

    pub(crate) async fn put_no_response<B: Serialize + Sync>(
        &self,
        api: ApiSurface,
        segments: &[&str],
        body: &B,
    ) -> Result<(), Error> {
        let resp = self.send(Method::PUT, api, segments, Some(body)).await?;
        Self::handle_empty(resp).await
    }

    pub(crate) async fn delete_no_response(&self, api: ApiSurface, segments: &[&str]) -> Result<(), Error> {
        let resp = self.send(Method::DELETE, api, segments, None::<&()>).await?;
        Self::handle_empty(resp).await
    }

    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        api: ApiSurface,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.url(api, segments);
        debug!("{method} {url}");

        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                Error::Transport(e)
            }
        })
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        // An empty 2xx body parses as JSON null.
        let text = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(text).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message = if raw.trim().is_empty() {
            status
                .canonical_reason()
                .map_or_else(|| status.to_string(), str::to_owned)
        } else {
            raw
        };
        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
