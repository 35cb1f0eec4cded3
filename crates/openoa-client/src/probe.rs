//! Zero-argument probe callables built on top of [`ApiClient`].
//!
//! A [`ProbeFn`] performs one remote call each time it is invoked. The
//! diagnostics registry stores one per endpoint and the health beacon
//! reuses the health endpoint's.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::transport::{ApiClient, TransportOutcome};

pub type ProbeFuture = Pin<Box<dyn Future<Output = TransportOutcome> + Send>>;

/// Callable producing one transport outcome per invocation.
pub type ProbeFn = Arc<dyn Fn() -> ProbeFuture + Send + Sync>;

/// Box an async closure into a [`ProbeFn`].
pub fn probe_fn<F, Fut>(f: F) -> ProbeFn
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = TransportOutcome> + Send + 'static,
{
    Arc::new(move || Box::pin(f()))
}

impl ApiClient {
    /// Probe issuing `GET {base}{path}`.
    pub fn get_probe(&self, path: impl Into<String>) -> ProbeFn {
        let client = self.clone();
        let path = path.into();
        probe_fn(move || {
            let client = client.clone();
            let path = path.clone();
            async move { client.get(&path).await }
        })
    }

    /// Probe issuing `POST {base}{path}` with a fixed JSON body.
    pub fn post_probe(&self, path: impl Into<String>, body: Value) -> ProbeFn {
        let client = self.clone();
        let path = path.into();
        probe_fn(move || {
            let client = client.clone();
            let path = path.clone();
            let body = body.clone();
            async move { client.post_json(&path, &body).await }
        })
    }
}
