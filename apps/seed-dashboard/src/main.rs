use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use seed_protocol::{
    EngineStatus, EngineSummary, EvolutionCounters, HealthStatus, NetworkSummary, PathCounts,
    PathDescriptor, PathMetrics, SeedGrowth, ServiceHealth, SystemMetrics,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Overview,
    Health,
    Paths,
    Evolution,
    All,
}

impl View {
    fn includes(self, panel: View) -> bool {
        self == View::All || self == panel
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "seed-dashboard",
    version,
    about = "Terminal dashboard for the AI-Seed API"
)]
struct Args {
    #[arg(long, env = "SEED_API_BASE", default_value = "http://127.0.0.1:8000")]
    base: String,
    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 5000)]
    interval_ms: u64,
    #[arg(long, value_enum, default_value_t = View::Overview)]
    view: View,
    /// Render a single tick and exit
    #[arg(long, default_value_t = false)]
    once: bool,
    /// Print each tick as one JSON object instead of summary lines
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Slice of `GET /api/metrics` the overview panel shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Overview {
    paths: PathMetrics,
    evolution: EvolutionCounters,
    system: SystemMetrics,
}

impl Overview {
    fn fallback() -> Self {
        Self {
            paths: PathMetrics {
                total: 12,
                active: 8,
                optimized: 5,
                ..PathMetrics::default()
            },
            evolution: EvolutionCounters {
                cycles: 23,
                improvements: 47,
                efficiency: 94.2,
                last_cycle: "unknown".into(),
            },
            system: SystemMetrics {
                uptime: "2d 14h 23m".into(),
                cpu: 23.5,
                memory: 67.8,
                containers: 6,
                version: "unknown".into(),
                platform: "unknown".into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct HealthPanel {
    overall: HealthStatus,
    services: Vec<ServiceHealth>,
    paths: PathCounts,
}

impl HealthPanel {
    fn fallback() -> Self {
        Self {
            overall: HealthStatus::Warning,
            services: Vec::new(),
            paths: PathCounts::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PathsPanel {
    paths: Vec<PathDescriptor>,
    network: NetworkSummary,
}

impl PathsPanel {
    fn fallback() -> Self {
        Self {
            paths: Vec::new(),
            network: NetworkSummary {
                total_connections: 0,
                active_flows: 0,
                bandwidth: "0 MB/s".into(),
                latency: "n/a".into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvolutionPanel {
    engine: EngineSummary,
    seed_growth: SeedGrowth,
}

impl EvolutionPanel {
    fn fallback() -> Self {
        Self {
            engine: EngineSummary {
                status: EngineStatus::Running,
                efficiency: 94.2,
                last_activity: "unknown".into(),
                current_cycle: 23,
                total_cycles: 23,
            },
            seed_growth: SeedGrowth {
                maturity: 78.0,
                stage: "Mature".into(),
                branch_count: 12,
                leaf_density: 156,
                root_depth: 45,
                growth_rate: 0.0,
                health_score: 0,
                next_evolution_in: "unknown".into(),
            },
        }
    }
}

/// One poll's worth of panels; panels outside the selected view stay `None`.
#[derive(Debug, Default, Serialize)]
struct Tick {
    #[serde(skip_serializing_if = "Option::is_none")]
    overview: Option<Overview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    health: Option<HealthPanel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paths: Option<PathsPanel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    evolution: Option<EvolutionPanel>,
}

fn fetch<T: DeserializeOwned>(client: &Client, base: &str, route: &str) -> Result<T> {
    let url = format!("{}{}", base.trim_end_matches('/'), route);
    let resp = client
        .get(&url)
        .header(ACCEPT, "application/json")
        .send()
        .with_context(|| format!("fetching {route}"))?;
    if !resp.status().is_success() {
        bail!("{route} failed: {}", resp.status());
    }
    resp.json()
        .with_context(|| format!("decoding {route} json"))
}

fn or_fallback<T>(panel: &str, fetched: Result<T>, fallback: impl FnOnce() -> T) -> T {
    match fetched {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(panel, error = %format!("{err:#}"), "fetch failed; showing fallback data");
            fallback()
        }
    }
}

fn poll(client: &Client, base: &str, view: View) -> Tick {
    let mut tick = Tick::default();
    if view.includes(View::Overview) {
        tick.overview = Some(or_fallback(
            "overview",
            fetch(client, base, "/api/metrics"),
            Overview::fallback,
        ));
    }
    if view.includes(View::Health) {
        tick.health = Some(or_fallback(
            "health",
            fetch(client, base, "/api/health"),
            HealthPanel::fallback,
        ));
    }
    if view.includes(View::Paths) {
        tick.paths = Some(or_fallback(
            "paths",
            fetch(client, base, "/api/paths"),
            PathsPanel::fallback,
        ));
    }
    if view.includes(View::Evolution) {
        tick.evolution = Some(or_fallback(
            "evolution",
            fetch(client, base, "/api/evolution"),
            EvolutionPanel::fallback,
        ));
    }
    tick
}

fn engine_status(status: EngineStatus) -> &'static str {
    match status {
        EngineStatus::Running => "running",
        EngineStatus::Stopped => "stopped",
    }
}

fn render_lines(tick: &Tick) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(o) = &tick.overview {
        lines.push(format!(
            "overview paths={}/{}/{} cycles={} improvements={} efficiency={:.1}% uptime={} cpu={:.1}% mem={:.1}% containers={}",
            o.paths.total,
            o.paths.active,
            o.paths.optimized,
            o.evolution.cycles,
            o.evolution.improvements,
            o.evolution.efficiency,
            o.system.uptime,
            o.system.cpu,
            o.system.memory,
            o.system.containers
        ));
    }
    if let Some(h) = &tick.health {
        let up = h
            .services
            .iter()
            .filter(|s| s.status == HealthStatus::Healthy)
            .count();
        lines.push(format!(
            "health overall={} services={}/{} paths healthy={} warning={} error={}",
            h.overall.as_str(),
            up,
            h.services.len(),
            h.paths.healthy,
            h.paths.warning,
            h.paths.error
        ));
    }
    if let Some(p) = &tick.paths {
        let mut ranked: Vec<&PathDescriptor> = p.paths.iter().collect();
        ranked.sort_by(|a, b| b.efficiency.cmp(&a.efficiency));
        let top = ranked
            .iter()
            .take(3)
            .map(|d| format!("{}:{}%/{}", d.id, d.efficiency, d.status.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "paths n={} top=[{}] flows={} latency={}",
            p.paths.len(),
            top,
            p.network.active_flows,
            p.network.latency
        ));
    }
    if let Some(e) = &tick.evolution {
        lines.push(format!(
            "evolution {} cycle={} efficiency={:.1}% maturity={:.1} stage={} branches={} leaves={}",
            engine_status(e.engine.status),
            e.engine.current_cycle,
            e.engine.efficiency,
            e.seed_growth.maturity,
            e.seed_growth.stage,
            e.seed_growth.branch_count,
            e.seed_growth.leaf_density
        ));
    }
    lines
}

fn render(tick: &Tick, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string(tick).unwrap_or_else(|_| "{}".to_string())
        );
        return;
    }
    let now = Local::now().format("%H:%M:%S");
    for line in render_lines(tick) {
        println!("[{}] {}", now, line);
    }
}

fn main() -> Result<()> {
    seed_otel::init_stderr();
    let args = Args::parse();
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .context("client build")?;
    let base = args.base.trim_end_matches('/').to_string();
    let interval = Duration::from_millis(args.interval_ms.max(100));
    tracing::debug!(%base, view = ?args.view, "polling");
    loop {
        let tick = poll(&client, &base, args.view);
        render(&tick, args.json);
        if args.once {
            return Ok(());
        }
        thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_client() -> Client {
        Client::builder()
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap()
    }

    #[test]
    fn unreachable_server_falls_back_to_literals() {
        let tick = poll(&quick_client(), "http://127.0.0.1:9", View::All);
        let overview = tick.overview.expect("overview");
        assert_eq!(overview.paths.total, 12);
        assert_eq!(overview.paths.active, 8);
        assert_eq!(overview.evolution.cycles, 23);
        assert_eq!(overview.system.uptime, "2d 14h 23m");
        assert_eq!(tick.health.expect("health").overall, HealthStatus::Warning);
        assert!(tick.paths.expect("paths").paths.is_empty());
        assert_eq!(tick.evolution.expect("evolution").engine.current_cycle, 23);
    }

    #[test]
    fn view_selects_panels() {
        let tick = poll(&quick_client(), "http://127.0.0.1:9", View::Health);
        assert!(tick.overview.is_none());
        assert!(tick.health.is_some());
        assert!(tick.paths.is_none());
        assert!(tick.evolution.is_none());
    }

    #[test]
    fn render_fallbacks_safe() {
        let tick = Tick {
            overview: Some(Overview::fallback()),
            health: Some(HealthPanel::fallback()),
            paths: Some(PathsPanel::fallback()),
            evolution: Some(EvolutionPanel::fallback()),
        };
        let lines = render_lines(&tick);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("overview paths=12/8/5"));
        assert!(lines[2].contains("top=[]"));
        render(&tick, true);
    }

    #[test]
    fn overview_decodes_metrics_payload() {
        let payload = serde_json::json!({
            "timestamp": "2024-01-01T00:00:00.000Z",
            "paths": {"total": 5, "active": 4, "optimized": 2, "healthy": 4, "warning": 1, "error": 0},
            "evolution": {"cycles": 24, "improvements": 48, "efficiency": 94.2, "lastCycle": "2024-01-01T00:00:00.000Z"},
            "system": {"uptime": "3m", "cpu": 10.0, "memory": 20.0, "containers": 6, "version": "1.0.0", "platform": "linux"},
            "performance": {"pathEfficiency": []}
        });
        let overview: Overview = serde_json::from_value(payload).expect("decode");
        assert_eq!(overview.paths.total, 5);
        assert_eq!(overview.evolution.cycles, 24);
    }
}
