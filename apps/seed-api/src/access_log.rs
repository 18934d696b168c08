use axum::extract::{ConnectInfo, MatchedPath};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;
use std::time::Instant;

use crate::request_ctx::RequestId;

/// Route template when a route matched (`/api/paths/{id}`), else the raw path.
fn route_label<B>(req: &Request<B>) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

/// One line per request on the `http.access` target, the file sink's filter.
pub async fn access_log_mw(req: Request<axum::body::Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = route_label(&req);
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|c| c.0.ip().to_string())
        .unwrap_or_default();
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.as_str().to_string())
        .unwrap_or_default();
    let user_agent = req
        .headers()
        .get(axum::http::header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("")
        .to_string();

    let res = next.run(req).await;
    let dur_ms = started.elapsed().as_millis() as u64;
    tracing::info!(
        target: seed_otel::ACCESS_TARGET,
        method = %method,
        path = %path,
        status = res.status().as_u16(),
        dur_ms,
        remote = %remote,
        request_id = %request_id,
        ua = %user_agent,
        "request"
    );
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::HeaderValue, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn label_echo(req: Request<Body>, next: Next) -> Response {
        let label = route_label(&req);
        let mut res = next.run(req).await;
        if let Ok(value) = HeaderValue::from_str(&label) {
            res.headers_mut().insert("x-route", value);
        }
        res
    }

    async fn label_for(uri: &str) -> String {
        let app = Router::new()
            .route("/api/paths/{id}", get(|| async { "ok" }))
            .fallback(|| async { axum::http::StatusCode::NOT_FOUND })
            .layer(middleware::from_fn(label_echo));
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        res.headers()
            .get("x-route")
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn matched_routes_log_their_template() {
        assert_eq!(label_for("/api/paths/build-path").await, "/api/paths/{id}");
    }

    #[tokio::test]
    async fn unmatched_requests_log_the_raw_path() {
        assert_eq!(label_for("/nowhere").await, "/nowhere");
    }
}
