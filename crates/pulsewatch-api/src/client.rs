// Monitoring service HTTP client
//
// Wraps `reqwest::Client` with URL construction, `{"detail": ...}` error
// unwrapping, and a single automatic retry of transient failures. All
// endpoint groups (posts, monitoring, manual entries, etc.) are
// implemented as inherent methods via separate files to keep this module
// focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Async client for the monitoring service's HTTP/JSON API.
///
/// Stateless beyond the connection pool: no caching, no cross-request
/// bookkeeping. Transient failures (connect errors, timeouts, 5xx) are
/// retried exactly once before surfacing; everything else is returned
/// to the caller untouched.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the service root (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path relative to the service root.
    pub(crate) fn url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and parse the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        self.execute(self.http.get(url)).await
    }

    /// Send a GET request with query parameters.
    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("GET {}", url);
        self.execute(self.http.get(url).query(query)).await
    }

    /// Send a bodyless POST request.
    pub(crate) async fn post<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("POST {}", url);
        self.execute(self.http.post(url)).await
    }

    /// Send a POST request with a JSON body.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        self.execute(self.http.post(url).json(body)).await
    }

    /// Send a PUT request with a JSON body.
    pub(crate) async fn put_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PUT {}", url);
        self.execute(self.http.put(url).json(body)).await
    }

    /// Send a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {}", url);
        self.execute(self.http.delete(url)).await
    }

    /// Send a request, retrying once on a transient failure.
    ///
    /// The retry reuses a clone of the request; JSON bodies are byte
    /// buffers so cloning always succeeds for the requests we build.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Error> {
        let retry = request.try_clone();
        match self.send(request).await {
            Err(err) if err.is_transient() => match retry {
                Some(second) => {
                    debug!(error = %err, "transient failure, retrying once");
                    self.send(second).await
                }
                None => Err(err),
            },
            result => result,
        }
    }

    /// Send a request and parse either the JSON payload or the
    /// service's `{"detail": msg}` error body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Error> {
        let resp = request.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_detail(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Extract the human-readable message from a FastAPI-style error body.
fn error_detail(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Detail {
        detail: String,
    }

    match serde_json::from_str::<Detail>(body) {
        Ok(d) => d.detail,
        Err(_) if body.is_empty() => "<empty body>".to_string(),
        Err(_) => body.to_string(),
    }
}
