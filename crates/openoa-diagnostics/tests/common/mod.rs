//! Fake OpenOA backend for diagnostics tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::{Value, json};

use openoa_client::ApiClient;
use openoa_core::{BaseUrl, UrlSource};

pub async fn spawn_backend(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// An address nothing is listening on.
pub async fn dead_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn client_for(addr: SocketAddr) -> ApiClient {
    let base = BaseUrl::parse(&format!("http://{addr}/api"), UrlSource::Override).unwrap();
    ApiClient::new(base, Duration::from_secs(2))
}

fn doc(name: &str) -> Value {
    json!({"title": name, "content": format!("{name} content")})
}

/// A backend serving every route the status page probes.
pub fn healthy_backend() -> Router {
    Router::new()
        .route(
            "/api/health",
            get(|| async { Json(json!({"status": "healthy", "version": "1.0.0"})) }),
        )
        .route(
            "/api/analysis",
            get(|| async { Json(json!({"count": 0, "methods": []})) }),
        )
        .route(
            "/api/analysis/{id}",
            get(|Path(id): Path<String>| async move {
                Json(json!({
                    "id": id,
                    "name": "Monte Carlo AEP",
                    "short_description": "s",
                    "long_description": "l",
                    "citations": []
                }))
            }),
        )
        .route(
            "/api/features",
            get(|| async { Json(json!({"count": 0, "features": []})) }),
        )
        .route(
            "/api/docs/{name}",
            get(|Path(name): Path<String>| async move { Json(doc(&name)) }),
        )
        .route(
            "/api/team",
            get(|| async { Json(json!({"count": 0, "members": []})) }),
        )
        .route(
            "/api/contact",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "invalid email"})),
                )
            }),
        )
}
