use std::mem;

use axum::{
    handler::Handler,
    routing::{get, post},
    Router,
};

use crate::{api, AppState};

pub(crate) mod paths {
    pub const ROOT: &str = "/";
    pub const LIVENESS: &str = "/health";

    pub const HEALTH: &str = "/api/health";
    pub const HEALTH_SERVICES: &str = "/api/health/services";
    pub const HEALTH_RESOURCES: &str = "/api/health/resources";

    pub const METRICS: &str = "/api/metrics";
    pub const METRICS_PATHS: &str = "/api/metrics/paths";
    pub const METRICS_SYSTEM: &str = "/api/metrics/system";

    pub const PATHS: &str = "/api/paths";
    pub const PATHS_ID: &str = "/api/paths/{id}";
    pub const PATHS_ID_EXECUTE: &str = "/api/paths/{id}/execute";
    pub const PATHS_NETWORK: &str = "/api/paths/network/visualization";

    pub const EVOLUTION: &str = "/api/evolution";
    pub const EVOLUTION_GROWTH: &str = "/api/evolution/growth";
    pub const EVOLUTION_INSIGHTS: &str = "/api/evolution/insights";
    pub const EVOLUTION_METRICS: &str = "/api/evolution/metrics";
    pub const EVOLUTION_ACTIVITY: &str = "/api/evolution/activity";
    pub const EVOLUTION_SUGGESTIONS: &str = "/api/evolution/suggestions";
    pub const EVOLUTION_HEALTH: &str = "/api/evolution/health";
    pub const EVOLUTION_START: &str = "/api/evolution/start";
    pub const EVOLUTION_STOP: &str = "/api/evolution/stop";
    pub const EVOLUTION_CYCLE_START: &str = "/api/evolution/cycle/start";
    pub const EVOLUTION_CYCLE_COMPLETE: &str = "/api/evolution/cycle/complete";
    pub const EVOLUTION_SUGGESTION_APPLY: &str = "/api/evolution/suggestions/{id}/apply";
}

pub(crate) struct RouterBuilder {
    router: Router<AppState>,
    endpoints: Vec<String>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            endpoints: Vec::new(),
        }
    }

    fn record(&mut self, method: &str, path: &'static str) {
        self.endpoints.push(format!("{} {}", method, path));
    }

    pub fn route_get<H, T>(&mut self, path: &'static str, handler: H) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: 'static,
    {
        self.record("GET", path);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, get(handler));
        self
    }

    pub fn route_post<H, T>(&mut self, path: &'static str, handler: H) -> &mut Self
    where
        H: Handler<T, AppState> + Clone + 'static,
        T: 'static,
    {
        self.record("POST", path);
        let router = mem::take(&mut self.router);
        self.router = router.route(path, post(handler));
        self
    }

    /// Attach the 404 fallbacks and hand back the router with its endpoint index.
    /// A known path with the wrong method is reported as an unknown route too.
    pub fn build(self) -> (Router<AppState>, Vec<String>) {
        let router = self
            .router
            .method_not_allowed_fallback(api::meta::not_found)
            .fallback(api::meta::not_found);
        (router, self.endpoints)
    }
}

fn register_meta_routes(builder: &mut RouterBuilder) {
    builder
        .route_get(paths::ROOT, api::meta::root)
        .route_get(paths::LIVENESS, api::meta::liveness);
}

fn register_health_routes(builder: &mut RouterBuilder) {
    builder
        .route_get(paths::HEALTH, api::health::health_report)
        .route_get(paths::HEALTH_SERVICES, api::health::health_services)
        .route_get(paths::HEALTH_RESOURCES, api::health::health_resources);
}

fn register_metrics_routes(builder: &mut RouterBuilder) {
    builder
        .route_get(paths::METRICS, api::metrics::metrics_snapshot)
        .route_get(paths::METRICS_PATHS, api::metrics::metrics_paths)
        .route_get(paths::METRICS_SYSTEM, api::metrics::metrics_system);
}

fn register_path_routes(builder: &mut RouterBuilder) {
    builder
        .route_get(paths::PATHS, api::paths::paths_list)
        .route_get(paths::PATHS_NETWORK, api::paths::paths_network)
        .route_get(paths::PATHS_ID, api::paths::path_get)
        .route_post(paths::PATHS_ID_EXECUTE, api::paths::path_execute);
}

fn register_evolution_routes(builder: &mut RouterBuilder) {
    builder
        .route_get(paths::EVOLUTION, api::evolution::evolution_snapshot)
        .route_get(paths::EVOLUTION_GROWTH, api::evolution::evolution_growth)
        .route_get(paths::EVOLUTION_INSIGHTS, api::evolution::evolution_insights)
        .route_get(paths::EVOLUTION_METRICS, api::evolution::evolution_metrics)
        .route_get(paths::EVOLUTION_ACTIVITY, api::evolution::evolution_activity)
        .route_get(
            paths::EVOLUTION_SUGGESTIONS,
            api::evolution::evolution_suggestions,
        )
        .route_get(paths::EVOLUTION_HEALTH, api::evolution::evolution_health)
        .route_post(paths::EVOLUTION_START, api::evolution::evolution_start)
        .route_post(paths::EVOLUTION_STOP, api::evolution::evolution_stop)
        .route_post(paths::EVOLUTION_CYCLE_START, api::evolution::cycle_start)
        .route_post(
            paths::EVOLUTION_CYCLE_COMPLETE,
            api::evolution::cycle_complete,
        )
        .route_post(
            paths::EVOLUTION_SUGGESTION_APPLY,
            api::evolution::suggestion_apply,
        );
}

pub(crate) fn build_router() -> (Router<AppState>, Vec<String>) {
    let mut builder = RouterBuilder::new();
    register_meta_routes(&mut builder);
    register_health_routes(&mut builder);
    register_metrics_routes(&mut builder);
    register_path_routes(&mut builder);
    register_evolution_routes(&mut builder);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_index_lists_every_route() {
        let (_, endpoints) = build_router();
        assert_eq!(endpoints.len(), 24);
        assert!(endpoints.contains(&"GET /api/paths/{id}".to_string()));
        assert!(endpoints.contains(&"POST /api/evolution/suggestions/{id}/apply".to_string()));
        let mut unique = endpoints.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), endpoints.len());
    }
}
