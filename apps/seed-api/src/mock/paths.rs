use chrono::{DateTime, Utc};
use seed_protocol::{HealthStatus, NetworkEdge, NetworkSummary, PathDescriptor, PathsReport};

use crate::random::RandomSource;
use crate::util::{iso, minutes_ago};

struct PathTemplate {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    steps: [&'static str; 4],
    efficiency: u32,
    executions: u64,
    minutes_since_run: i64,
    average_time: &'static str,
    error_rate: f64,
    /// Draws above this flip the path to `warning`.
    warn_above: Option<f64>,
}

const CATALOG: [PathTemplate; 5] = [
    PathTemplate {
        id: "build-path",
        name: "Build Path",
        description: "Code compilation and artifact generation",
        steps: ["Source Code", "Dependencies", "Compilation", "Artifacts"],
        efficiency: 98,
        executions: 145,
        minutes_since_run: 2,
        average_time: "45s",
        error_rate: 0.02,
        warn_above: None,
    },
    PathTemplate {
        id: "test-path",
        name: "Testing Path",
        description: "Automated testing and quality assurance",
        steps: ["Unit Tests", "Integration", "E2E Tests", "Coverage"],
        efficiency: 95,
        executions: 89,
        minutes_since_run: 5,
        average_time: "2m 15s",
        error_rate: 0.05,
        warn_above: None,
    },
    PathTemplate {
        id: "deploy-path",
        name: "Deployment Path",
        description: "Application deployment and release",
        steps: ["Package", "Staging", "Validation", "Production"],
        efficiency: 87,
        executions: 67,
        minutes_since_run: 60,
        average_time: "8m 30s",
        error_rate: 0.13,
        warn_above: Some(0.7),
    },
    PathTemplate {
        id: "evolution-path",
        name: "Evolution Path",
        description: "AI-powered optimization and improvement",
        steps: ["Analysis", "Planning", "Implementation", "Validation"],
        efficiency: 92,
        executions: 23,
        minutes_since_run: 30,
        average_time: "15m 45s",
        error_rate: 0.08,
        warn_above: None,
    },
    PathTemplate {
        id: "monitor-path",
        name: "Monitoring Path",
        description: "System health and performance monitoring",
        steps: ["Metrics", "Alerts", "Analysis", "Response"],
        efficiency: 97,
        executions: 234,
        minutes_since_run: 1,
        average_time: "5s",
        error_rate: 0.03,
        warn_above: None,
    },
];

/// Fixed ring connecting the catalog: build, test, deploy, monitor, evolution, back to build.
const EDGES: [(&str, &str, f64); 5] = [
    ("build-path", "test-path", 0.9),
    ("test-path", "deploy-path", 0.8),
    ("deploy-path", "monitor-path", 0.7),
    ("monitor-path", "evolution-path", 0.6),
    ("evolution-path", "build-path", 0.5),
];

pub(crate) fn network_summary() -> NetworkSummary {
    NetworkSummary {
        total_connections: 45,
        active_flows: 12,
        bandwidth: "125 MB/s".into(),
        latency: "15ms".into(),
    }
}

pub(crate) fn edges() -> Vec<NetworkEdge> {
    EDGES
        .iter()
        .map(|(source, target, strength)| NetworkEdge {
            source: (*source).into(),
            target: (*target).into(),
            strength: *strength,
        })
        .collect()
}

fn describe(tpl: &PathTemplate, rng: &dyn RandomSource, now: DateTime<Utc>) -> PathDescriptor {
    let status = match tpl.warn_above {
        Some(threshold) if rng.next_f64() > threshold => HealthStatus::Warning,
        _ => HealthStatus::Healthy,
    };
    PathDescriptor {
        id: tpl.id.into(),
        name: tpl.name.into(),
        description: tpl.description.into(),
        steps: tpl.steps.iter().map(|s| (*s).to_string()).collect(),
        status,
        efficiency: tpl.efficiency,
        executions: tpl.executions,
        last_execution: minutes_ago(now, tpl.minutes_since_run),
        average_time: tpl.average_time.into(),
        error_rate: tpl.error_rate,
    }
}

/// All five descriptors; only jittered paths consume draws.
pub(crate) fn catalog(rng: &dyn RandomSource, now: DateTime<Utc>) -> Vec<PathDescriptor> {
    CATALOG.iter().map(|tpl| describe(tpl, rng, now)).collect()
}

pub(crate) fn find(id: &str, rng: &dyn RandomSource, now: DateTime<Utc>) -> Option<PathDescriptor> {
    CATALOG
        .iter()
        .find(|tpl| tpl.id == id)
        .map(|tpl| describe(tpl, rng, now))
}

pub(crate) fn paths_snapshot(rng: &dyn RandomSource, now: DateTime<Utc>) -> PathsReport {
    PathsReport {
        timestamp: iso(now),
        paths: catalog(rng, now),
        network: network_summary(),
    }
}
