use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ProcessInfo;

/// Traffic-light status shared by services, paths and the overall rollup.
///
/// Variants are ordered by severity so that the worst status is the maximum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Error,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Warning => "warning",
            HealthStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worst status among `statuses`; an empty input is healthy.
pub fn rollup<I>(statuses: I) -> HealthStatus
where
    I: IntoIterator<Item = HealthStatus>,
{
    statuses.into_iter().max().unwrap_or(HealthStatus::Healthy)
}

/// Overall status of a service list: `error` beats `warning` beats `healthy`.
pub fn overall_status(services: &[ServiceHealth]) -> HealthStatus {
    rollup(services.iter().map(|s| s.status))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub name: String,
    pub status: HealthStatus,
    pub uptime: String,
    pub response_time: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CpuUsage {
    pub usage: f64,
    pub cores: u32,
}

/// Percentage plus human-readable capacity figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CapacityUsage {
    pub usage: f64,
    pub total: String,
    pub used: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NetworkThroughput {
    #[serde(rename = "in")]
    pub inbound: String,
    #[serde(rename = "out")]
    pub outbound: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResourceUsage {
    pub cpu: CpuUsage,
    pub memory: CapacityUsage,
    pub disk: CapacityUsage,
    pub network: NetworkThroughput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct PathCounts {
    pub healthy: u32,
    pub warning: u32,
    pub error: u32,
    pub total: u32,
}

impl PathCounts {
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = HealthStatus>,
    {
        statuses
            .into_iter()
            .fold(PathCounts::default(), |mut acc, status| {
                match status {
                    HealthStatus::Healthy => acc.healthy += 1,
                    HealthStatus::Warning => acc.warning += 1,
                    HealthStatus::Error => acc.error += 1,
                }
                acc.total += 1;
                acc
            })
    }
}

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    pub overall: HealthStatus,
    pub timestamp: String,
    pub services: Vec<ServiceHealth>,
    pub resources: ResourceUsage,
    pub paths: PathCounts,
}

/// `GET /api/health/services`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServicesReport {
    pub timestamp: String,
    pub services: Vec<ServiceHealth>,
    pub overall: HealthStatus,
}

/// `GET /api/health/resources`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResourcesReport {
    pub timestamp: String,
    pub resources: ResourceUsage,
    pub process: ProcessInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn service(name: &str, status: HealthStatus) -> ServiceHealth {
        ServiceHealth {
            name: name.into(),
            status,
            uptime: "1m".into(),
            response_time: "10ms".into(),
            url: "http://localhost".into(),
        }
    }

    #[test]
    fn overall_is_healthy_when_all_healthy() {
        let services = vec![
            service("API", HealthStatus::Healthy),
            service("Cache", HealthStatus::Healthy),
        ];
        assert_eq!(overall_status(&services), HealthStatus::Healthy);
        assert_eq!(overall_status(&[]), HealthStatus::Healthy);
    }

    #[test]
    fn overall_is_warning_when_any_warning() {
        let services = vec![
            service("API", HealthStatus::Healthy),
            service("AI Engine", HealthStatus::Warning),
            service("Cache", HealthStatus::Healthy),
        ];
        assert_eq!(overall_status(&services), HealthStatus::Warning);
    }

    #[test]
    fn overall_is_error_when_any_error() {
        let services = vec![
            service("API", HealthStatus::Warning),
            service("Database", HealthStatus::Error),
            service("Cache", HealthStatus::Warning),
        ];
        assert_eq!(overall_status(&services), HealthStatus::Error);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_value(service("API", HealthStatus::Warning)).unwrap();
        assert_eq!(json["status"], "warning");
        assert_eq!(json["responseTime"], "10ms");
    }

    #[test]
    fn tally_counts_each_status() {
        let counts = PathCounts::tally([
            HealthStatus::Healthy,
            HealthStatus::Warning,
            HealthStatus::Healthy,
            HealthStatus::Error,
        ]);
        assert_eq!(
            counts,
            PathCounts {
                healthy: 2,
                warning: 1,
                error: 1,
                total: 4
            }
        );
    }

    fn any_status() -> impl Strategy<Value = HealthStatus> {
        prop_oneof![
            Just(HealthStatus::Healthy),
            Just(HealthStatus::Warning),
            Just(HealthStatus::Error),
        ]
    }

    proptest! {
        #[test]
        fn rollup_matches_precedence(statuses in proptest::collection::vec(any_status(), 0..12)) {
            let expected = if statuses.contains(&HealthStatus::Error) {
                HealthStatus::Error
            } else if statuses.contains(&HealthStatus::Warning) {
                HealthStatus::Warning
            } else {
                HealthStatus::Healthy
            };
            prop_assert_eq!(rollup(statuses.iter().copied()), expected);
        }
    }
}
