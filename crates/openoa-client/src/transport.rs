//! HTTP transport for the OpenOA API.
//!
//! A thin request/response layer over the hyper client: one base URL,
//! one fixed timeout, JSON in and out. There is no caching and no retry
//! here; callers decide what to do with a failed outcome.

use std::time::Duration;

use bytes::Bytes;
use http::{Method, Request, Uri, header};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use openoa_core::{BaseUrl, ResolvedConfig};

use crate::error::TransportError;

const USER_AGENT: &str = "openoa-status/0.1";

/// Result of a single remote call.
pub type TransportOutcome = Result<ApiResponse, TransportError>;

/// A 2xx response with its decoded body.
///
/// Non-JSON bodies are carried as a JSON string, empty bodies as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// Configured client for the OpenOA API. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    base: BaseUrl,
    timeout: Duration,
    http: Client<HttpConnector, Full<Bytes>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `base` with a per-call `timeout`.
    ///
    /// Must be called from within a tokio runtime context when the
    /// first request is sent.
    pub fn new(base: BaseUrl, timeout: Duration) -> Self {
        let http = Client::builder(TokioExecutor::new()).build_http();
        Self {
            base,
            timeout,
            http,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.base_url.clone(), config.timeout)
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET {base}{path}`.
    pub async fn get(&self, path: &str) -> TransportOutcome {
        self.call(Method::GET, path, None).await
    }

    /// `POST {base}{path}` with a JSON body.
    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> TransportOutcome {
        let encoded = serde_json::to_vec(body)
            .map_err(|e| TransportError::InvalidRequest(format!("failed to encode body: {e}")))?;
        self.call(Method::POST, path, Some(Bytes::from(encoded))).await
    }

    /// Send one request and normalize the outcome.
    ///
    /// The timeout covers connecting, the response head, and the body.
    pub async fn call(&self, method: Method, path: &str, body: Option<Bytes>) -> TransportOutcome {
        let url = self.base.join(path);
        let uri: Uri = url
            .parse()
            .map_err(|e| TransportError::InvalidRequest(format!("{url}: {e}")))?;

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, USER_AGENT);
        let body = match body {
            Some(bytes) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Full::new(bytes)
            }
            None => Full::new(Bytes::new()),
        };
        let request = builder
            .body(body)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let exchange = async {
            let response = self.http.request(request).await.map_err(|e| {
                debug!(error = ?e, %method, %url, "request failed before a response arrived");
                TransportError::Unreachable {
                    reason: e.to_string(),
                }
            })?;
            let status = response.status();
            let bytes = response
                .into_body()
                .collect()
                .await
                .map_err(|e| {
                    debug!(error = %e, %method, %url, "response body interrupted");
                    TransportError::Unreachable {
                        reason: e.to_string(),
                    }
                })?
                .to_bytes();
            Ok::<_, TransportError>((status, bytes))
        };

        let (status, bytes) = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result?,
            Err(_) => {
                debug!(%method, %url, timeout = ?self.timeout, "request timed out");
                return Err(TransportError::Timeout {
                    after: self.timeout,
                });
            }
        };

        let body = decode_body(&bytes);
        if status.is_success() {
            debug!(%method, %url, status = status.as_u16(), "request succeeded");
            Ok(ApiResponse {
                status: status.as_u16(),
                body,
            })
        } else {
            debug!(%method, %url, status = status.as_u16(), "request returned error status");
            Err(TransportError::Server {
                status: status.as_u16(),
                detail: extract_detail(&body),
            })
        }
    }
}

fn decode_body(bytes: &Bytes) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Pull the human-readable `detail` out of an error body.
fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
