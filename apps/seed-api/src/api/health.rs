use axum::{extract::State, Json};
use chrono::Utc;
use seed_protocol::{HealthReport, ResourcesReport, ServicesReport};

use crate::{mock, responses::ApiError, util::iso, AppState};

/// Full health report: services, resources and path counts.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    operation_id = "health_doc",
    responses(
        (status = 200, description = "Health report", body = HealthReport)
    )
)]
pub async fn health_report(State(state): State<AppState>) -> Result<Json<HealthReport>, ApiError> {
    Ok(Json(mock::health_snapshot(
        state.rng(),
        Utc::now(),
        state.uptime_secs(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/health/services",
    tag = "Health",
    operation_id = "health_services_doc",
    responses(
        (status = 200, description = "Service statuses", body = ServicesReport)
    )
)]
pub async fn health_services(
    State(state): State<AppState>,
) -> Result<Json<ServicesReport>, ApiError> {
    let report = mock::health_snapshot(state.rng(), Utc::now(), state.uptime_secs());
    Ok(Json(ServicesReport {
        timestamp: report.timestamp,
        services: report.services,
        overall: report.overall,
    }))
}

/// Mock host resources plus a real sample of this process.
#[utoipa::path(
    get,
    path = "/api/health/resources",
    tag = "Health",
    operation_id = "health_resources_doc",
    responses(
        (status = 200, description = "Resource usage", body = ResourcesReport)
    )
)]
pub async fn health_resources(
    State(state): State<AppState>,
) -> Result<Json<ResourcesReport>, ApiError> {
    Ok(Json(ResourcesReport {
        timestamp: iso(Utc::now()),
        resources: mock::health::resources(state.rng()),
        process: state.process().info(),
    }))
}
