use chrono::{DateTime, Utc};
use seed_protocol::{
    format_uptime, overall_status, CapacityUsage, CpuUsage, HealthReport, HealthStatus,
    NetworkThroughput, PathCounts, ResourceUsage, ServiceHealth,
};

use crate::random::RandomSource;
use crate::util::iso;

fn service(
    name: &str,
    status: HealthStatus,
    uptime: impl Into<String>,
    response_time: impl Into<String>,
    url: &str,
) -> ServiceHealth {
    ServiceHealth {
        name: name.into(),
        status,
        uptime: uptime.into(),
        response_time: response_time.into(),
        url: url.into(),
    }
}

/// Six services of the demo stack. The API entry reports this process's own uptime.
pub(crate) fn services(rng: &dyn RandomSource, uptime_secs: u64) -> Vec<ServiceHealth> {
    let ai_status = if rng.next_f64() > 0.8 {
        HealthStatus::Warning
    } else {
        HealthStatus::Healthy
    };
    let ai_latency = (rng.next_f64() * 200.0 + 200.0).floor() as u64;
    vec![
        service("Frontend", HealthStatus::Healthy, "2d 14h", "45ms", "http://frontend:3000"),
        service(
            "API",
            HealthStatus::Healthy,
            format_uptime(uptime_secs),
            "120ms",
            "http://api:8000",
        ),
        service(
            "AI Engine",
            ai_status,
            "1d 8h",
            format!("{ai_latency}ms"),
            "http://ai-engine:5000",
        ),
        service(
            "Database",
            HealthStatus::Healthy,
            "7d 3h",
            "25ms",
            "postgresql://database:5432",
        ),
        service("Cache", HealthStatus::Healthy, "7d 3h", "8ms", "redis://cache:6379"),
        service("Monitor", HealthStatus::Healthy, "2d 14h", "15ms", "http://monitor:80"),
    ]
}

pub(crate) fn resources(rng: &dyn RandomSource) -> ResourceUsage {
    let cpu = rng.next_f64() * 30.0 + 10.0;
    let memory = rng.next_f64() * 20.0 + 60.0;
    let disk = rng.next_f64() * 20.0 + 40.0;
    let net_in = rng.next_f64() * 2.0 + 0.5;
    let net_out = rng.next_f64() + 0.3;
    ResourceUsage {
        cpu: CpuUsage {
            usage: cpu,
            cores: 4,
        },
        memory: CapacityUsage {
            usage: memory,
            total: "8GB".into(),
            used: format!("{:.1}GB", (memory * 0.8).floor() / 10.0),
        },
        disk: CapacityUsage {
            usage: disk,
            total: "100GB".into(),
            used: format!("{}GB", disk.floor() as u64),
        },
        network: NetworkThroughput {
            inbound: format!("{net_in:.1}MB/s"),
            outbound: format!("{net_out:.1}MB/s"),
        },
    }
}

pub(crate) fn health_snapshot(
    rng: &dyn RandomSource,
    now: DateTime<Utc>,
    uptime_secs: u64,
) -> HealthReport {
    let services = services(rng, uptime_secs);
    let overall = overall_status(&services);
    let resources = resources(rng);
    let paths = PathCounts::tally(
        super::paths::catalog(rng, now)
            .into_iter()
            .map(|path| path.status),
    );
    HealthReport {
        overall,
        timestamp: iso(now),
        services,
        resources,
        paths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    #[test]
    fn ai_engine_warns_above_threshold() {
        let report = health_snapshot(&SequenceRandom::constant(0.9), Utc::now(), 90);
        assert_eq!(report.overall, HealthStatus::Warning);
        let ai = report.services.iter().find(|s| s.name == "AI Engine").unwrap();
        assert_eq!(ai.response_time, "380ms");
        assert_eq!(report.services.len(), 6);
    }

    #[test]
    fn quiet_draws_are_healthy() {
        let report = health_snapshot(&SequenceRandom::constant(0.0), Utc::now(), 3_700);
        assert_eq!(report.overall, HealthStatus::Healthy);
        let api = report.services.iter().find(|s| s.name == "API").unwrap();
        assert_eq!(api.uptime, "1h 1m");
        assert_eq!(report.paths.total, 5);
        assert_eq!(report.paths.healthy, 5);
    }

    #[test]
    fn resources_stay_in_band() {
        for draw in [0.0, 0.25, 0.5, 0.999] {
            let r = resources(&SequenceRandom::constant(draw));
            assert!((10.0..40.0).contains(&r.cpu.usage));
            assert!((60.0..80.0).contains(&r.memory.usage));
            assert!((40.0..60.0).contains(&r.disk.usage));
            assert_eq!(r.cpu.cores, 4);
        }
        let r = resources(&SequenceRandom::constant(0.5));
        assert_eq!(r.memory.used, "5.6GB");
        assert_eq!(r.disk.used, "50GB");
        assert_eq!(r.network.inbound, "1.5MB/s");
        assert_eq!(r.network.outbound, "0.8MB/s");
    }
}
