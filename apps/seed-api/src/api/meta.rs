use axum::{extract::State, http::Method, http::StatusCode, http::Uri, Json};
use seed_protocol::{EndpointIndex, ErrorBody, Liveness, RootDescriptor};

use crate::{router::paths, util, AppState};

/// Service descriptor and route group index.
#[utoipa::path(
    get,
    path = "/",
    tag = "Meta",
    operation_id = "root_doc",
    description = "Service name, version and the prefixes of each route group.",
    responses(
        (status = 200, description = "Service descriptor", body = RootDescriptor)
    )
)]
pub async fn root() -> Json<RootDescriptor> {
    Json(RootDescriptor {
        name: "AI-Seed API".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        status: "running".into(),
        description: "Backend service for AI-Seed evolution engine".into(),
        endpoints: EndpointIndex {
            metrics: paths::METRICS.into(),
            health: paths::HEALTH.into(),
            paths: paths::PATHS.into(),
            evolution: paths::EVOLUTION.into(),
        },
    })
}

/// Process liveness check.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Meta",
    operation_id = "liveness_doc",
    description = "Liveness check with process uptime and memory.",
    responses(
        (status = 200, description = "Process alive", body = Liveness)
    )
)]
pub async fn liveness(State(state): State<AppState>) -> Json<Liveness> {
    let process = state.process();
    Json(Liveness {
        status: "healthy".into(),
        timestamp: util::now_iso(),
        uptime: process.uptime_secs(),
        memory: process.memory(),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("Route not found").with_route(method.as_str(), path)),
    )
}
