use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

const DEFAULT_HEADERS: [(&str, &str); 6] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("permissions-policy", "geolocation=(), microphone=(), camera=()"),
    ("cross-origin-opener-policy", "same-origin"),
    ("x-dns-prefetch-control", "off"),
];

fn add_hdr(h: &mut HeaderMap, name: &'static str, val: &str) {
    let name = HeaderName::from_static(name);
    if !h.contains_key(&name) {
        if let Ok(v) = HeaderValue::from_str(val) {
            h.insert(name, v);
        }
    }
}

/// Baseline hardening headers on every response; handler-set values win.
pub async fn headers_mw(req: Request<axum::body::Body>, next: Next) -> Response {
    let mut res = next.run(req).await;
    let h = res.headers_mut();
    for (name, val) in DEFAULT_HEADERS {
        add_hdr(h, name, val);
    }
    // JSON only; nothing here should load subresources.
    add_hdr(
        h,
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    );
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn headers_are_added_without_overriding() {
        let app = Router::new()
            .route(
                "/",
                get(|| async { ([("x-frame-options", "SAMEORIGIN")], "ok") }),
            )
            .layer(axum::middleware::from_fn(headers_mw));
        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let h = res.headers();
        assert_eq!(h.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(h.get("x-frame-options").unwrap(), "SAMEORIGIN");
        assert!(h.contains_key("content-security-policy"));
    }
}
