//! Mock snapshots regenerated on every read.
//!
//! Each generator is a pure function of a random source, the current time and,
//! where needed, the process uptime.

pub(crate) mod health;
pub(crate) mod metrics;
pub(crate) mod paths;

pub(crate) use health::health_snapshot;
pub(crate) use metrics::metrics_snapshot;
pub(crate) use paths::paths_snapshot;
