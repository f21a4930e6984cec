//! Process statistics for the liveness report.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

/// Memory figures for the current process, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub rss: u64,
    pub virtual_memory: u64,
}

/// Read the current process memory. Zeroes when the platform does not
/// expose it.
pub fn memory_stats() -> MemoryStats {
    let pid = match sysinfo::get_current_pid() {
        Ok(pid) => pid,
        Err(e) => {
            tracing::debug!(error = e, "Process id unavailable");
            return MemoryStats::default();
        }
    };

    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );

    system
        .process(pid)
        .map(|process| MemoryStats {
            rss: process.memory(),
            virtual_memory: process.virtual_memory(),
        })
        .unwrap_or_default()
}

/// Seconds elapsed since `started`.
pub fn uptime_secs(started: Instant) -> f64 {
    started.elapsed().as_secs_f64()
}
