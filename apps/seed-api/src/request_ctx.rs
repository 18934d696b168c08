use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

const HEADER_REQUEST_ID: &str = "x-request-id";
const MAX_ID_LEN: usize = 128;

/// Id carried in request extensions and echoed on the response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestId(String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reuse a client-supplied `x-request-id` or mint a UUID for this request.
pub async fn request_id_mw(mut req: Request<Body>, next: Next) -> Response {
    let header = HeaderName::from_static(HEADER_REQUEST_ID);
    let id = req
        .headers()
        .get(&header)
        .and_then(|value| value.to_str().ok())
        .and_then(normalize_id)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;
    if !res.headers().contains_key(&header) {
        if let Ok(value) = HeaderValue::from_str(&id) {
            res.headers_mut().insert(header, value);
        }
    }
    res
}

fn normalize_id(raw: &str) -> Option<String> {
    let out: String = raw
        .trim()
        .chars()
        .filter(|ch| !ch.is_control())
        .take(MAX_ID_LEN)
        .collect();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn normalize_id_trims_controls_and_limits_length() {
        assert_eq!(normalize_id("  abc  "), Some("abc".into()));
        assert!(normalize_id("   ").is_none());
        assert_eq!(normalize_id("a\u{0007}b\u{007f}c"), Some("abc".into()));
        let long = "x".repeat(MAX_ID_LEN + 24);
        assert_eq!(normalize_id(&long).unwrap().len(), MAX_ID_LEN);
    }

    #[tokio::test]
    async fn provided_id_is_echoed() {
        let app = Router::new()
            .route(
                "/",
                get(|req: Request<Body>| async move {
                    let id = req.extensions().get::<RequestId>().cloned();
                    assert_eq!(id.map(|i| i.0), Some("req-xyz".to_string()));
                    Response::new(Body::empty())
                }),
            )
            .layer(axum::middleware::from_fn(request_id_mw));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("x-request-id", "req-xyz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("response");
        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("req-xyz"),
        );
    }

    #[tokio::test]
    async fn missing_id_is_generated() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(request_id_mw));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .expect("response");
        let id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
