use std::time::Instant;

use parking_lot::Mutex;
use seed_protocol::{ProcessInfo, ProcessMemory};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Samples this server's own process. CPU usage is the delta since the previous sample,
/// so the first reading after startup is zero.
pub(crate) struct ProcessSampler {
    started: Instant,
    pid: Option<Pid>,
    sys: Mutex<System>,
}

impl ProcessSampler {
    pub(crate) fn new() -> Self {
        let pid = sysinfo::get_current_pid()
            .map_err(|err| tracing::warn!(%err, "process sampling disabled"))
            .ok();
        Self {
            started: Instant::now(),
            pid,
            sys: Mutex::new(System::new()),
        }
    }

    pub(crate) fn uptime_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn sample(&self) -> (ProcessMemory, f64) {
        let Some(pid) = self.pid else {
            return (ProcessMemory::default(), 0.0);
        };
        let mut sys = self.sys.lock();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        match sys.process(pid) {
            Some(proc_) => (
                ProcessMemory {
                    rss: proc_.memory(),
                    virt: proc_.virtual_memory(),
                },
                f64::from(proc_.cpu_usage()),
            ),
            None => (ProcessMemory::default(), 0.0),
        }
    }

    pub(crate) fn memory(&self) -> ProcessMemory {
        self.sample().0
    }

    pub(crate) fn info(&self) -> ProcessInfo {
        let (memory, cpu) = self.sample();
        ProcessInfo {
            uptime: self.uptime_secs(),
            memory,
            cpu,
            version: env!("CARGO_PKG_VERSION").to_string(),
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}
