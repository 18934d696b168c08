use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use seed_protocol::{
    ActivityReport, ApplySuggestionResponse, CompleteCycleRequest, CycleCompleteResponse,
    CycleStartResponse, EvolutionHealthResponse, EvolutionMetricsReport, EvolutionSnapshot,
    GrowthReport, InsightsReport, StartEngineRequest, StartEngineResponse, StopEngineResponse,
    SuggestionsReport,
};

use crate::{
    responses::{ApiError, Payload},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/evolution",
    tag = "Evolution",
    operation_id = "evolution_doc",
    description = "Engine status, metrics, seed growth, recent activity and suggestions.",
    responses(
        (status = 200, description = "Evolution snapshot", body = EvolutionSnapshot)
    )
)]
pub async fn evolution_snapshot(
    State(state): State<AppState>,
) -> Result<Json<EvolutionSnapshot>, ApiError> {
    Ok(Json(state.evolution().snapshot(Utc::now())))
}

#[utoipa::path(
    get,
    path = "/api/evolution/growth",
    tag = "Evolution",
    operation_id = "evolution_growth_doc",
    responses(
        (status = 200, description = "Seed growth, history and projections", body = GrowthReport)
    )
)]
pub async fn evolution_growth(
    State(state): State<AppState>,
) -> Result<Json<GrowthReport>, ApiError> {
    Ok(Json(state.evolution().growth(Utc::now())))
}

#[utoipa::path(
    get,
    path = "/api/evolution/insights",
    tag = "Evolution",
    operation_id = "evolution_insights_doc",
    responses(
        (status = 200, description = "Growth insights and recommendations", body = InsightsReport)
    )
)]
pub async fn evolution_insights(
    State(state): State<AppState>,
) -> Result<Json<InsightsReport>, ApiError> {
    Ok(Json(state.evolution().insights(Utc::now())))
}

#[utoipa::path(
    get,
    path = "/api/evolution/metrics",
    tag = "Evolution",
    operation_id = "evolution_metrics_doc",
    responses(
        (status = 200, description = "Evolution metrics and trends", body = EvolutionMetricsReport)
    )
)]
pub async fn evolution_metrics(
    State(state): State<AppState>,
) -> Result<Json<EvolutionMetricsReport>, ApiError> {
    Ok(Json(state.evolution().metrics(Utc::now())))
}

#[utoipa::path(
    get,
    path = "/api/evolution/activity",
    tag = "Evolution",
    operation_id = "evolution_activity_doc",
    responses(
        (status = 200, description = "Recent improvements", body = ActivityReport)
    )
)]
pub async fn evolution_activity(
    State(state): State<AppState>,
) -> Result<Json<ActivityReport>, ApiError> {
    Ok(Json(state.evolution().activity(Utc::now())))
}

#[utoipa::path(
    get,
    path = "/api/evolution/suggestions",
    tag = "Evolution",
    operation_id = "evolution_suggestions_doc",
    responses(
        (status = 200, description = "Suggestion catalog", body = SuggestionsReport)
    )
)]
pub async fn evolution_suggestions(
    State(state): State<AppState>,
) -> Result<Json<SuggestionsReport>, ApiError> {
    Ok(Json(state.evolution().suggestions(Utc::now())))
}

#[utoipa::path(
    get,
    path = "/api/evolution/health",
    tag = "Evolution",
    operation_id = "evolution_health_doc",
    responses(
        (status = 200, description = "Component health, seed health and vitals", body = EvolutionHealthResponse)
    )
)]
pub async fn evolution_health(
    State(state): State<AppState>,
) -> Result<Json<EvolutionHealthResponse>, ApiError> {
    Ok(Json(state.evolution().health(Utc::now())))
}

/// Mark the engine running. Body fields default to `automatic` and one cycle.
#[utoipa::path(
    post,
    path = "/api/evolution/start",
    tag = "Evolution",
    operation_id = "evolution_start_doc",
    request_body(content = StartEngineRequest, description = "Optional run parameters"),
    responses(
        (status = 200, description = "Engine started", body = StartEngineResponse),
        (status = 500, description = "Malformed body", body = seed_protocol::ErrorBody)
    )
)]
pub async fn evolution_start(
    State(state): State<AppState>,
    Payload(req): Payload<StartEngineRequest>,
) -> Result<Json<StartEngineResponse>, ApiError> {
    tracing::info!(mode = %req.mode, cycles = req.cycles, "evolution engine start requested");
    Ok(Json(state.evolution().start_engine(req, Utc::now())))
}

#[utoipa::path(
    post,
    path = "/api/evolution/stop",
    tag = "Evolution",
    operation_id = "evolution_stop_doc",
    responses(
        (status = 200, description = "Engine stopped", body = StopEngineResponse)
    )
)]
pub async fn evolution_stop(
    State(state): State<AppState>,
) -> Result<Json<StopEngineResponse>, ApiError> {
    tracing::info!("evolution engine stop requested");
    Ok(Json(state.evolution().stop_engine(Utc::now())))
}

/// Open the next cycle and advance seed growth.
#[utoipa::path(
    post,
    path = "/api/evolution/cycle/start",
    tag = "Evolution",
    operation_id = "evolution_cycle_start_doc",
    responses(
        (status = 200, description = "Cycle started", body = CycleStartResponse)
    )
)]
pub async fn cycle_start(
    State(state): State<AppState>,
) -> Result<Json<CycleStartResponse>, ApiError> {
    Ok(Json(state.evolution().start_cycle(state.rng(), Utc::now())))
}

/// Complete the current cycle and archive it.
#[utoipa::path(
    post,
    path = "/api/evolution/cycle/complete",
    tag = "Evolution",
    operation_id = "evolution_cycle_complete_doc",
    request_body(content = CompleteCycleRequest, description = "Improvements made during the cycle"),
    responses(
        (status = 200, description = "Cycle completed", body = CycleCompleteResponse),
        (status = 500, description = "Malformed body", body = seed_protocol::ErrorBody)
    )
)]
pub async fn cycle_complete(
    State(state): State<AppState>,
    Payload(req): Payload<CompleteCycleRequest>,
) -> Result<Json<CycleCompleteResponse>, ApiError> {
    Ok(Json(
        state
            .evolution()
            .complete_cycle(req.improvements, Utc::now()),
    ))
}

#[utoipa::path(
    post,
    path = "/api/evolution/suggestions/{id}/apply",
    tag = "Evolution",
    operation_id = "evolution_suggestion_apply_doc",
    params(("id" = String, Path, description = "Suggestion id, e.g. suggestion-1")),
    responses(
        (status = 200, description = "Suggestion queued", body = ApplySuggestionResponse),
        (status = 404, description = "Unknown suggestion", body = seed_protocol::ErrorBody)
    )
)]
pub async fn suggestion_apply(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApplySuggestionResponse>, ApiError> {
    match state.evolution().apply_suggestion(&id, Utc::now()) {
        Some(applied) => {
            tracing::info!(suggestion = %id, application = %applied.application_id, "suggestion applied");
            Ok(Json(applied))
        }
        None => Err(ApiError::not_found("Suggestion", id)),
    }
}
