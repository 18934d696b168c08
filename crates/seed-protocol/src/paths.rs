use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::HealthStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PathDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub steps: Vec<String>,
    pub status: HealthStatus,
    pub efficiency: u32,
    pub executions: u64,
    pub last_execution: String,
    pub average_time: String,
    pub error_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSummary {
    pub total_connections: u32,
    pub active_flows: u32,
    pub bandwidth: String,
    pub latency: String,
}

/// `GET /api/paths`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PathsReport {
    pub timestamp: String,
    pub paths: Vec<PathDescriptor>,
    pub network: NetworkSummary,
}

/// `GET /api/paths/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PathReport {
    pub timestamp: String,
    pub path: PathDescriptor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionState {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStep {
    pub name: String,
    pub status: ExecutionState,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: String,
    pub path_id: String,
    pub status: ExecutionState,
    pub start_time: String,
    pub steps: Vec<ExecutionStep>,
}

/// `POST /api/paths/{id}/execute`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExecuteResponse {
    pub message: String,
    pub execution: Execution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NetworkNode {
    pub id: String,
    pub name: String,
    pub status: HealthStatus,
    pub efficiency: u32,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NetworkEdge {
    pub source: String,
    pub target: String,
    pub strength: f64,
}

/// `GET /api/paths/network/visualization`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NetworkGraph {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
    pub metadata: NetworkSummary,
}
