use std::any::Any;
use std::net::SocketAddr;

use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use seed_protocol::ErrorBody;
use utoipa::OpenApi;

use crate::{access_log, request_ctx, responses, router, security, AppState};

const DEFAULT_PORT: &str = "8000";
const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_MAX_CONC: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("invalid API_HTTP_MAX_CONC: {0}")]
    InvalidConcurrency(String),
    #[error("invalid API_PORT: {0}")]
    InvalidPort(String),
    #[error("invalid API_BIND: {0}")]
    InvalidBind(String),
    #[error("invalid FRONTEND_URL: {0}")]
    InvalidFrontendUrl(String),
}

#[derive(Clone, Debug)]
pub(crate) struct ServerConfig {
    pub addr: SocketAddr,
    pub concurrency_limit: usize,
    pub frontend_origin: HeaderValue,
    pub dev_mode: bool,
    pub access_log: bool,
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => {
            let v = v.trim();
            !(v == "0" || v.eq_ignore_ascii_case("false") || v.eq_ignore_ascii_case("off"))
        }
        Err(_) => default,
    }
}

/// `APP_ENV`, falling back to `NODE_ENV`; anything but `development` is production.
pub(crate) fn dev_mode_from_env() -> bool {
    std::env::var("APP_ENV")
        .or_else(|_| std::env::var("NODE_ENV"))
        .map(|v| v.trim().eq_ignore_ascii_case("development"))
        .unwrap_or(false)
}

pub(crate) fn server_config_from_env() -> Result<ServerConfig, ConfigError> {
    let concurrency_limit = std::env::var("API_HTTP_MAX_CONC")
        .ok()
        .map(|raw| {
            raw.trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidConcurrency(raw))
        })
        .transpose()?
        .unwrap_or(DEFAULT_MAX_CONC);

    let bind = std::env::var("API_BIND").unwrap_or_else(|_| DEFAULT_BIND.into());
    let port_raw = std::env::var("API_PORT").unwrap_or_else(|_| DEFAULT_PORT.into());
    let port: u16 = port_raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(port_raw.clone()))?;
    let ip: std::net::IpAddr = bind
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;

    let frontend = std::env::var("FRONTEND_URL").unwrap_or_else(|_| DEFAULT_FRONTEND_URL.into());
    let frontend_origin = HeaderValue::from_str(frontend.trim().trim_end_matches('/'))
        .map_err(|_| ConfigError::InvalidFrontendUrl(frontend.clone()))?;

    Ok(ServerConfig {
        addr: SocketAddr::new(ip, port),
        concurrency_limit,
        frontend_origin,
        dev_mode: dev_mode_from_env(),
        access_log: env_flag("API_ACCESS_LOG", true),
    })
}

/// Turn a caught panic into the generic 500 envelope.
pub(crate) fn panic_response(err: Box<dyn Any + Send + 'static>, expose: bool) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(
            ErrorBody::new(responses::INTERNAL_TITLE)
                .with_message(responses::client_message(&detail, expose)),
        ),
    )
        .into_response()
}

pub(crate) fn attach_http_layers(router: axum::Router<()>, cfg: &ServerConfig) -> axum::Router<()> {
    use tower::limit::ConcurrencyLimitLayer;
    use tower_http::{
        catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer,
    };

    let expose = cfg.dev_mode;
    router
        .layer(CatchPanicLayer::custom(
            move |err: Box<dyn Any + Send + 'static>| panic_response(err, expose),
        ))
        .layer(ConcurrencyLimitLayer::new(cfg.concurrency_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

pub(crate) fn attach_global_layers(
    router: axum::Router<()>,
    cfg: &ServerConfig,
) -> axum::Router<()> {
    use tower_http::cors::CorsLayer;

    let router = if cfg.access_log {
        router.layer(axum::middleware::from_fn(access_log::access_log_mw))
    } else {
        router
    };
    let cors = CorsLayer::new()
        .allow_origin(cfg.frontend_origin.clone())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ]);
    router
        .layer(axum::middleware::from_fn(request_ctx::request_id_mw))
        .layer(cors)
        .layer(axum::middleware::from_fn(security::headers_mw))
}

/// Routes, state and every layer, as served.
pub(crate) fn build_app(state: AppState, cfg: &ServerConfig) -> axum::Router<()> {
    let (router, endpoints) = router::build_router();
    tracing::debug!(count = endpoints.len(), "routes registered");
    for endpoint in &endpoints {
        tracing::trace!(%endpoint, "route");
    }
    attach_global_layers(attach_http_layers(router.with_state(state), cfg), cfg)
}

pub(crate) fn ensure_openapi_export() -> Result<Option<String>, std::io::Error> {
    if let Ok(path) = std::env::var("OPENAPI_OUT") {
        export_openapi(&path)?;
        return Ok(Some(path));
    }
    Ok(None)
}

fn export_openapi(path: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = crate::openapi::ApiDoc::openapi()
        .to_pretty_json()
        .map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::env as test_env;

    const VARS: [&str; 7] = [
        "API_HTTP_MAX_CONC",
        "API_BIND",
        "API_PORT",
        "FRONTEND_URL",
        "APP_ENV",
        "NODE_ENV",
        "API_ACCESS_LOG",
    ];

    fn clean_env() -> test_env::EnvGuard {
        test_env::cleared(&VARS)
    }

    #[test]
    fn defaults_when_unset() {
        let _guard = clean_env();
        let cfg = server_config_from_env().expect("defaults parse");
        assert_eq!(cfg.addr, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(cfg.concurrency_limit, 1024);
        assert_eq!(cfg.frontend_origin, "http://localhost:3000");
        assert!(!cfg.dev_mode);
        assert!(cfg.access_log);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut guard = clean_env();
        guard.set("API_PORT", "eighty");
        let err = server_config_from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref p) if p == "eighty"));
    }

    #[test]
    fn invalid_bind_and_concurrency_are_rejected() {
        let mut guard = clean_env();
        guard.set("API_BIND", "not-an-ip");
        assert!(matches!(
            server_config_from_env().unwrap_err(),
            ConfigError::InvalidBind(_)
        ));
        guard.set("API_BIND", "127.0.0.1");
        guard.set("API_HTTP_MAX_CONC", "0");
        assert!(matches!(
            server_config_from_env().unwrap_err(),
            ConfigError::InvalidConcurrency(_)
        ));
    }

    #[test]
    fn ipv6_bind_and_overrides() {
        let mut guard = clean_env();
        guard.set("API_BIND", "[::1]");
        guard.set("API_PORT", "9100");
        guard.set("API_ACCESS_LOG", "0");
        guard.set("FRONTEND_URL", "https://seed.example/");
        let cfg = server_config_from_env().expect("parse");
        assert_eq!(cfg.addr, "[::1]:9100".parse().unwrap());
        assert!(!cfg.access_log);
        assert_eq!(cfg.frontend_origin, "https://seed.example");
    }

    #[test]
    fn app_env_wins_over_node_env() {
        let mut guard = clean_env();
        guard.set("NODE_ENV", "development");
        assert!(dev_mode_from_env());
        guard.set("APP_ENV", "production");
        assert!(!dev_mode_from_env());
        guard.set("APP_ENV", "Development");
        assert!(dev_mode_from_env());
    }

    #[test]
    fn openapi_export_writes_json() {
        let mut guard = clean_env();
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("docs").join("openapi.json");
        guard.set("OPENAPI_OUT", out.display().to_string());
        let written = ensure_openapi_export().expect("export");
        assert_eq!(written.as_deref(), Some(out.display().to_string().as_str()));
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).expect("read")).expect("json");
        assert!(doc["paths"]["/api/evolution/cycle/start"].is_object());
        assert!(doc["paths"]["/api/paths/{id}"].is_object());
    }
}
