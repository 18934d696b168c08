//! Wire types for the AI-Seed API.
//! Field names are camelCase on the wire; every type doubles as an OpenAPI schema.

mod evolution;
mod health;
mod meta;
mod metrics;
mod paths;

pub use evolution::*;
pub use health::*;
pub use meta::*;
pub use metrics::*;
pub use paths::*;

/// Render a process uptime the way the dashboard shows it: `1d 2h 3m`, `2h 3m` or `3m`.
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
