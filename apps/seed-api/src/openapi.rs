use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "AI-Seed API", description = "Mock evolution-engine metrics for the AI-Seed dashboard"),
    paths(
        crate::api::meta::root,
        crate::api::meta::liveness,
        crate::api::health::health_report,
        crate::api::health::health_services,
        crate::api::health::health_resources,
        crate::api::metrics::metrics_snapshot,
        crate::api::metrics::metrics_paths,
        crate::api::metrics::metrics_system,
        crate::api::paths::paths_list,
        crate::api::paths::path_get,
        crate::api::paths::path_execute,
        crate::api::paths::paths_network,
        crate::api::evolution::evolution_snapshot,
        crate::api::evolution::evolution_growth,
        crate::api::evolution::evolution_insights,
        crate::api::evolution::evolution_metrics,
        crate::api::evolution::evolution_activity,
        crate::api::evolution::evolution_suggestions,
        crate::api::evolution::evolution_health,
        crate::api::evolution::evolution_start,
        crate::api::evolution::evolution_stop,
        crate::api::evolution::cycle_start,
        crate::api::evolution::cycle_complete,
        crate::api::evolution::suggestion_apply,
    ),
    components(schemas(seed_protocol::ErrorBody)),
    tags(
        (name = "Meta", description = "Service descriptor and liveness"),
        (name = "Health", description = "Service and resource health"),
        (name = "Metrics", description = "Path, evolution and system counters"),
        (name = "Paths", description = "Pipeline path catalog and simulated runs"),
        (name = "Evolution", description = "Evolution engine state, cycles and suggestions")
    )
)]
pub struct ApiDoc;
