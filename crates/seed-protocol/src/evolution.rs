use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Stable,
    Decreasing,
}

fn unspecified() -> String {
    "unspecified".to_string()
}

/// A single change recorded against a cycle. Clients may omit everything but `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    #[serde(rename = "type", default = "unspecified")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths_affected: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub id: u64,
    pub status: CycleStatus,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub improvements: Vec<Improvement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionMetrics {
    pub total_cycles: u64,
    pub improvements_made: u64,
    pub efficiency_gain: f64,
    pub last_cycle_date: String,
    pub health_score: u32,
    pub paths_optimized: u32,
    pub times_saved: String,
    pub bugs_fixed: u32,
    pub performance_gains: String,
    pub reliability_increase: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineSummary {
    pub status: EngineStatus,
    pub efficiency: f64,
    pub last_activity: String,
    pub current_cycle: u64,
    pub total_cycles: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedGrowth {
    pub maturity: f64,
    pub stage: String,
    pub branch_count: u32,
    pub leaf_density: u32,
    pub root_depth: u32,
    pub growth_rate: f64,
    pub health_score: u32,
    pub next_evolution_in: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub date: String,
    pub maturity: f64,
    pub branch_count: u32,
    pub leaf_density: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GrowthInsight {
    pub id: u32,
    pub category: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub recommendation: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub estimated_impact: String,
    pub complexity: String,
    pub paths_affected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    pub timestamp: String,
    pub paths_affected: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthIndicators {
    pub build_system: u32,
    pub code_quality: u32,
    pub test_coverage: u32,
    pub documentation: u32,
    pub security: u32,
    pub performance: u32,
}

/// `GET /api/evolution`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionSnapshot {
    pub timestamp: String,
    pub engine: EngineSummary,
    pub metrics: EvolutionMetrics,
    pub seed_growth: SeedGrowth,
    pub recent_activity: Vec<Activity>,
    pub health_indicators: HealthIndicators,
    pub suggestions: Vec<Suggestion>,
    pub growth_insights: Vec<GrowthInsight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub maturity: f64,
    pub branch_count: u32,
    pub leaf_density: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Projections {
    pub next_week: Projection,
    pub next_month: Projection,
}

/// `GET /api/evolution/growth`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrowthReport {
    pub seed_growth: SeedGrowth,
    pub growth_history: Vec<GrowthPoint>,
    pub projections: Projections,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: Priority,
    pub description: String,
    pub impact: String,
}

/// `GET /api/evolution/insights`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InsightsReport {
    pub insights: Vec<GrowthInsight>,
    pub recommendations: Vec<Recommendation>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Trend {
    pub current: f64,
    pub change: f64,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub code_quality: Trend,
    pub test_coverage: Trend,
    pub performance: Trend,
    pub security: Trend,
}

/// `GET /api/evolution/metrics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EvolutionMetricsReport {
    pub timestamp: String,
    pub metrics: EvolutionMetrics,
    pub engine: EngineSummary,
    pub trends: Trends,
}

/// `GET /api/evolution/activity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActivityReport {
    pub timestamp: String,
    pub activity: Vec<Activity>,
}

/// `GET /api/evolution/suggestions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuggestionsReport {
    pub timestamp: String,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedHealth {
    pub maturity: f64,
    pub health_score: u32,
    pub growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComponentTrends {
    pub improving: Vec<String>,
    pub stable: Vec<String>,
    pub declining: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Vitals {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionHealth {
    pub overall: u32,
    pub components: HealthIndicators,
    pub seed_health: SeedHealth,
    pub trends: ComponentTrends,
    pub vitals: Vitals,
    pub last_updated: String,
}

/// `GET /api/evolution/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EvolutionHealthResponse {
    pub success: bool,
    pub data: EvolutionHealth,
}

fn default_mode() -> String {
    "automatic".to_string()
}

fn default_cycles() -> u32 {
    1
}

/// Body of `POST /api/evolution/start`; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StartEngineRequest {
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_cycles")]
    pub cycles: u32,
}

impl Default for StartEngineRequest {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            cycles: default_cycles(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartEngineResponse {
    pub message: String,
    pub mode: String,
    pub cycles: u32,
    pub estimated_duration: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StopEngineResponse {
    pub message: String,
    pub stop_time: String,
    pub cycles_completed: u64,
    pub last_activity: String,
}

/// `POST /api/evolution/cycle/start`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CycleStartResponse {
    pub success: bool,
    pub data: Cycle,
    pub message: String,
    pub growth_update: SeedGrowth,
}

/// Body of `POST /api/evolution/cycle/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct CompleteCycleRequest {
    #[serde(default)]
    pub improvements: Vec<Improvement>,
}

/// `POST /api/evolution/cycle/complete`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CycleCompleteResponse {
    pub success: bool,
    pub data: Cycle,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileChange {
    pub file: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// `POST /api/evolution/suggestions/{id}/apply`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplySuggestionResponse {
    pub message: String,
    pub suggestion: Suggestion,
    pub application_id: String,
    pub estimated_time: String,
    pub start_time: String,
    pub changes: Vec<FileChange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improvement_accepts_bare_type() {
        let imp: Improvement = serde_json::from_str(r#"{"type":"x"}"#).unwrap();
        assert_eq!(imp.kind, "x");
        assert_eq!(imp.description, None);
        assert_eq!(
            serde_json::to_value(&imp).unwrap(),
            serde_json::json!({"type": "x"})
        );
    }

    #[test]
    fn improvement_defaults_type_and_ignores_unknown_keys() {
        let imp: Improvement =
            serde_json::from_str(r#"{"description":"d","owner":"me"}"#).unwrap();
        assert_eq!(imp.kind, "unspecified");
        assert_eq!(imp.description.as_deref(), Some("d"));
    }

    #[test]
    fn start_request_defaults() {
        let req: StartEngineRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, StartEngineRequest::default());
        assert_eq!(req.mode, "automatic");
        assert_eq!(req.cycles, 1);
    }

    #[test]
    fn cycle_status_is_snake_case() {
        assert_eq!(
            serde_json::to_value(CycleStatus::InProgress).unwrap(),
            serde_json::json!("in_progress")
        );
    }
}
