use once_cell::sync::OnceCell;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{
    fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Target used by the HTTP access log middleware.
pub const ACCESS_TARGET: &str = "http.access";

static ACCESS_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Rolling file sink for `http.access` events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogFile {
    pub dir: String,
    pub prefix: String,
    pub rotation: Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Minutely,
    Hourly,
    Daily,
}

impl AccessLogFile {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup("SEED_ACCESS_LOG_ROLL").as_deref() != Some("1") {
            return None;
        }
        let dir = lookup("SEED_ACCESS_LOG_DIR")
            .or_else(|| lookup("SEED_LOGS_DIR"))
            .unwrap_or_else(|| "logs".to_string());
        let prefix = lookup("SEED_ACCESS_LOG_PREFIX").unwrap_or_else(|| "http-access".into());
        let rotation = match lookup("SEED_ACCESS_LOG_ROTATION")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "hourly" => Rotation::Hourly,
            "minutely" => Rotation::Minutely,
            _ => Rotation::Daily,
        };
        Some(Self {
            dir,
            prefix,
            rotation,
        })
    }
}

/// Install the console subscriber on stdout. Safe to call more than once.
pub fn init() {
    install(fmt::layer::<Registry>());
}

/// Same as [`init`] but writes to stderr, keeping stdout free for CLI output.
pub fn init_stderr() {
    install(fmt::layer::<Registry>().with_writer(std::io::stderr));
}

fn install<L>(console: L)
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(console.with_filter(filter))
        .with(access_layer(AccessLogFile::from_env()));
    let _ = registry.try_init();
}

fn access_layer<S>(cfg: Option<AccessLogFile>) -> Option<impl Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let cfg = cfg?;
    if let Err(err) = std::fs::create_dir_all(&cfg.dir) {
        // The subscriber is not installed yet.
        eprintln!("failed to create access log directory {}: {err}", cfg.dir);
    }
    let writer = match cfg.rotation {
        Rotation::Hourly => tracing_appender::rolling::hourly(&cfg.dir, &cfg.prefix),
        Rotation::Minutely => tracing_appender::rolling::minutely(&cfg.dir, &cfg.prefix),
        Rotation::Daily => tracing_appender::rolling::daily(&cfg.dir, &cfg.prefix),
    };
    let (nb, guard) = tracing_appender::non_blocking(writer);
    let _ = ACCESS_GUARD.set(guard);
    let targets = Targets::new().with_target(ACCESS_TARGET, tracing::Level::INFO);
    Some(
        fmt::layer::<S>()
            .with_ansi(false)
            .with_target(false)
            .with_writer(nb)
            .with_filter(targets),
    )
}
