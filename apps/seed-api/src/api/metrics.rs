use axum::{extract::State, Json};
use chrono::Utc;
use seed_protocol::{MetricsSnapshot, PathMetricsReport, SystemMetricsReport};

use crate::{mock, responses::ApiError, util::iso, AppState};

fn snapshot(state: &AppState) -> MetricsSnapshot {
    mock::metrics_snapshot(
        state.rng(),
        Utc::now(),
        state.uptime_secs(),
        state.evolution().counters(),
    )
}

#[utoipa::path(
    get,
    path = "/api/metrics",
    tag = "Metrics",
    operation_id = "metrics_doc",
    description = "Path, evolution and system counters in one snapshot.",
    responses(
        (status = 200, description = "Metrics snapshot", body = MetricsSnapshot)
    )
)]
pub async fn metrics_snapshot(
    State(state): State<AppState>,
) -> Result<Json<MetricsSnapshot>, ApiError> {
    Ok(Json(snapshot(&state)))
}

#[utoipa::path(
    get,
    path = "/api/metrics/paths",
    tag = "Metrics",
    operation_id = "metrics_paths_doc",
    responses(
        (status = 200, description = "Path counters", body = PathMetricsReport)
    )
)]
pub async fn metrics_paths(
    State(state): State<AppState>,
) -> Result<Json<PathMetricsReport>, ApiError> {
    let snap = snapshot(&state);
    Ok(Json(PathMetricsReport {
        timestamp: snap.timestamp,
        paths: snap.paths,
        performance: snap.performance,
    }))
}

#[utoipa::path(
    get,
    path = "/api/metrics/system",
    tag = "Metrics",
    operation_id = "metrics_system_doc",
    responses(
        (status = 200, description = "System counters and process sample", body = SystemMetricsReport)
    )
)]
pub async fn metrics_system(
    State(state): State<AppState>,
) -> Result<Json<SystemMetricsReport>, ApiError> {
    Ok(Json(SystemMetricsReport {
        timestamp: iso(Utc::now()),
        system: mock::metrics::system_metrics(state.rng(), state.uptime_secs()),
        process: state.process().info(),
    }))
}
