use chrono::{DateTime, Utc};
use seed_protocol::{
    format_uptime, EvolutionCounters, HealthStatus, MetricsSnapshot, PathDescriptor,
    PathEfficiency, PathMetrics, Performance, SystemMetrics,
};

use crate::random::RandomSource;
use crate::util::iso;

const OPTIMIZED_AT: u32 = 95;
const CONTAINERS: u32 = 6;

pub(crate) fn path_metrics(paths: &[PathDescriptor]) -> PathMetrics {
    let mut out = PathMetrics::default();
    for path in paths {
        out.total += 1;
        match path.status {
            HealthStatus::Healthy => out.healthy += 1,
            HealthStatus::Warning => out.warning += 1,
            HealthStatus::Error => out.error += 1,
        }
        if path.status != HealthStatus::Error {
            out.active += 1;
        }
        if path.efficiency >= OPTIMIZED_AT {
            out.optimized += 1;
        }
    }
    out
}

pub(crate) fn performance(paths: &[PathDescriptor]) -> Performance {
    Performance {
        path_efficiency: paths
            .iter()
            .map(|path| PathEfficiency {
                name: path
                    .name
                    .strip_suffix(" Path")
                    .unwrap_or(&path.name)
                    .to_string(),
                efficiency: path.efficiency,
                executions: path.executions,
            })
            .collect(),
    }
}

pub(crate) fn system_metrics(rng: &dyn RandomSource, uptime_secs: u64) -> SystemMetrics {
    SystemMetrics {
        uptime: format_uptime(uptime_secs),
        cpu: rng.next_f64() * 30.0 + 10.0,
        memory: rng.next_f64() * 20.0 + 60.0,
        containers: CONTAINERS,
        version: env!("CARGO_PKG_VERSION").to_string(),
        platform: std::env::consts::OS.to_string(),
    }
}

pub(crate) fn metrics_snapshot(
    rng: &dyn RandomSource,
    now: DateTime<Utc>,
    uptime_secs: u64,
    evolution: EvolutionCounters,
) -> MetricsSnapshot {
    let paths = super::paths::catalog(rng, now);
    MetricsSnapshot {
        timestamp: iso(now),
        paths: path_metrics(&paths),
        evolution,
        system: system_metrics(rng, uptime_secs),
        performance: performance(&paths),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    fn counters() -> EvolutionCounters {
        EvolutionCounters {
            cycles: 23,
            improvements: 47,
            efficiency: 94.2,
            last_cycle: "2024-01-15T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn path_counters_follow_catalog() {
        let snap = metrics_snapshot(&SequenceRandom::constant(0.9), Utc::now(), 60, counters());
        assert_eq!(snap.paths.total, 5);
        assert_eq!(snap.paths.active, 5);
        assert_eq!(snap.paths.optimized, 3);
        assert_eq!(snap.paths.warning, 1);
        assert_eq!(snap.paths.healthy, 4);
        assert_eq!(snap.evolution.cycles, 23);
        assert_eq!(snap.system.containers, 6);
        assert_eq!(snap.system.uptime, "1m");
    }

    #[test]
    fn performance_uses_short_names() {
        let snap = metrics_snapshot(&SequenceRandom::constant(0.1), Utc::now(), 0, counters());
        let names: Vec<_> = snap
            .performance
            .path_efficiency
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Build", "Testing", "Deployment", "Evolution", "Monitoring"]);
        assert!((10.0..40.0).contains(&snap.system.cpu));
        assert!((60.0..80.0).contains(&snap.system.memory));
    }
}
