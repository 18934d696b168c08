use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ProcessInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct PathMetrics {
    pub total: u32,
    pub active: u32,
    pub optimized: u32,
    pub healthy: u32,
    pub warning: u32,
    pub error: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionCounters {
    pub cycles: u64,
    pub improvements: u64,
    pub efficiency: f64,
    pub last_cycle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SystemMetrics {
    pub uptime: String,
    pub cpu: f64,
    pub memory: f64,
    pub containers: u32,
    pub version: String,
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PathEfficiency {
    pub name: String,
    pub efficiency: u32,
    pub executions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub path_efficiency: Vec<PathEfficiency>,
}

/// `GET /api/metrics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub paths: PathMetrics,
    pub evolution: EvolutionCounters,
    pub system: SystemMetrics,
    pub performance: Performance,
}

/// `GET /api/metrics/paths`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PathMetricsReport {
    pub timestamp: String,
    pub paths: PathMetrics,
    pub performance: Performance,
}

/// `GET /api/metrics/system`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SystemMetricsReport {
    pub timestamp: String,
    pub system: SystemMetrics,
    pub process: ProcessInfo,
}
