use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use seed_protocol::{
    ExecuteResponse, Execution, ExecutionState, ExecutionStep, NetworkGraph, NetworkNode,
    PathReport, PathsReport,
};

use crate::{mock, responses::ApiError, util::iso, AppState};

#[utoipa::path(
    get,
    path = "/api/paths",
    tag = "Paths",
    operation_id = "paths_doc",
    responses(
        (status = 200, description = "Path catalog and network summary", body = PathsReport)
    )
)]
pub async fn paths_list(State(state): State<AppState>) -> Result<Json<PathsReport>, ApiError> {
    Ok(Json(mock::paths_snapshot(state.rng(), Utc::now())))
}

#[utoipa::path(
    get,
    path = "/api/paths/{id}",
    tag = "Paths",
    operation_id = "path_get_doc",
    params(("id" = String, Path, description = "Path id, e.g. build-path")),
    responses(
        (status = 200, description = "Path descriptor", body = PathReport),
        (status = 404, description = "Unknown path", body = seed_protocol::ErrorBody)
    )
)]
pub async fn path_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PathReport>, ApiError> {
    let now = Utc::now();
    let path = mock::paths::find(&id, state.rng(), now)
        .ok_or_else(|| ApiError::not_found("Path", id))?;
    Ok(Json(PathReport {
        timestamp: iso(now),
        path,
    }))
}

/// Start a simulated run; every step is reported as pending.
#[utoipa::path(
    post,
    path = "/api/paths/{id}/execute",
    tag = "Paths",
    operation_id = "path_execute_doc",
    params(("id" = String, Path, description = "Path id")),
    responses(
        (status = 200, description = "Execution started", body = ExecuteResponse),
        (status = 404, description = "Unknown path", body = seed_protocol::ErrorBody)
    )
)]
pub async fn path_execute(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExecuteResponse>, ApiError> {
    let now = Utc::now();
    let Some(path) = mock::paths::find(&id, state.rng(), now) else {
        return Err(ApiError::not_found("Path", id));
    };
    let execution = Execution {
        id: format!("exec-{}", now.timestamp_millis()),
        path_id: path.id.clone(),
        status: ExecutionState::Running,
        start_time: iso(now),
        steps: path
            .steps
            .iter()
            .map(|name| ExecutionStep {
                name: name.clone(),
                status: ExecutionState::Pending,
                start_time: None,
                end_time: None,
            })
            .collect(),
    };
    tracing::info!(path = %path.id, execution = %execution.id, "path execution started");
    Ok(Json(ExecuteResponse {
        message: format!("Path {} execution started", path.name),
        execution,
    }))
}

#[utoipa::path(
    get,
    path = "/api/paths/network/visualization",
    tag = "Paths",
    operation_id = "paths_network_doc",
    responses(
        (status = 200, description = "Nodes and edges of the path network", body = NetworkGraph)
    )
)]
pub async fn paths_network(State(state): State<AppState>) -> Result<Json<NetworkGraph>, ApiError> {
    let nodes = mock::paths::catalog(state.rng(), Utc::now())
        .into_iter()
        .map(|path| NetworkNode {
            id: path.id,
            name: path.name,
            status: path.status,
            efficiency: path.efficiency,
            kind: "path".into(),
        })
        .collect();
    Ok(Json(NetworkGraph {
        nodes,
        edges: mock::paths::edges(),
        metadata: mock::paths::network_summary(),
    }))
}
