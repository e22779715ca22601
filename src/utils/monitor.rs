use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

/// Steps of one conversion, in the order the engine runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Extract,
    Transform,
    Load,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Extract => "Extract",
            Phase::Transform => "Transform",
            Phase::Load => "Load",
        }
    }

    /// What the item count of this phase measures.
    pub fn unit(self) -> &'static str {
        match self {
            Phase::Extract => "rows parsed",
            Phase::Transform => "bookings sorted",
            Phase::Load => "bytes written",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStats {
    pub phase: Phase,
    pub elapsed: Duration,
    pub items: u64,
    /// Resident memory of the process after the phase, if it could be read.
    pub memory_mb: Option<u64>,
}

impl PhaseStats {
    /// Items per second, `None` for phases too short to measure.
    pub fn throughput(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        (secs > 0.0).then(|| self.items as f64 / secs)
    }
}

#[cfg(feature = "cli")]
mod memory {
    use std::cell::RefCell;
    use sysinfo::{Pid, ProcessesToUpdate, System};

    pub struct MemorySampler {
        system: RefCell<System>,
        pid: Option<Pid>,
    }

    impl MemorySampler {
        pub fn new() -> Self {
            let pid = match sysinfo::get_current_pid() {
                Ok(pid) => Some(pid),
                Err(e) => {
                    tracing::warn!("Process memory unavailable: {}", e);
                    None
                }
            };
            Self {
                system: RefCell::new(System::new()),
                pid,
            }
        }

        pub fn resident_mb(&self) -> Option<u64> {
            let pid = self.pid?;
            let mut system = self.system.borrow_mut();
            system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
            system.process(pid).map(|p| p.memory() / 1024 / 1024)
        }
    }
}

#[cfg(not(feature = "cli"))]
mod memory {
    // Library builds without the cli feature carry no sysinfo
    pub struct MemorySampler;

    impl MemorySampler {
        pub fn new() -> Self {
            Self
        }

        pub fn resident_mb(&self) -> Option<u64> {
            None
        }
    }
}

/// Times each conversion phase and relates it to the work done: rows parsed,
/// bookings sorted and bytes written.
///
/// A disabled monitor records nothing and never touches the process table.
pub struct ConversionMonitor {
    enabled: bool,
    started: Instant,
    phase_started: Cell<Instant>,
    phases: RefCell<Vec<PhaseStats>>,
    memory: memory::MemorySampler,
}

impl ConversionMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            started: now,
            phase_started: Cell::new(now),
            phases: RefCell::new(Vec::new()),
            memory: memory::MemorySampler::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn begin_phase(&self) {
        self.phase_started.set(Instant::now());
    }

    /// Closes the phase opened by the last [`begin_phase`](Self::begin_phase).
    pub fn finish_phase(&self, phase: Phase, items: u64) {
        if !self.enabled {
            return;
        }

        let stats = PhaseStats {
            phase,
            elapsed: self.phase_started.get().elapsed(),
            items,
            memory_mb: self.memory.resident_mb(),
        };

        let memory = stats
            .memory_mb
            .map_or_else(|| "n/a".to_string(), |mb| format!("{}MB", mb));
        match stats.throughput() {
            Some(rate) => tracing::info!(
                "📊 {} - {} {} in {:?} ({:.0}/s), Memory: {}",
                phase.label(),
                items,
                phase.unit(),
                stats.elapsed,
                rate,
                memory
            ),
            None => tracing::info!(
                "📊 {} - {} {} in {:?}, Memory: {}",
                phase.label(),
                items,
                phase.unit(),
                stats.elapsed,
                memory
            ),
        }

        self.phases.borrow_mut().push(stats);
    }

    pub fn phases(&self) -> Vec<PhaseStats> {
        self.phases.borrow().clone()
    }

    fn items_of(&self, phase: Phase) -> u64 {
        self.phases
            .borrow()
            .iter()
            .filter(|s| s.phase == phase)
            .map(|s| s.items)
            .sum()
    }

    pub fn peak_memory_mb(&self) -> Option<u64> {
        self.phases.borrow().iter().filter_map(|s| s.memory_mb).max()
    }

    pub fn log_summary(&self) {
        if !self.enabled {
            return;
        }

        tracing::info!(
            "📊 Conversion took {:?}: {} rows parsed, {} bytes written, Peak memory: {}",
            self.started.elapsed(),
            self.items_of(Phase::Extract),
            self.items_of(Phase::Load),
            self.peak_memory_mb()
                .map_or_else(|| "n/a".to_string(), |mb| format!("{}MB", mb))
        );
    }
}

impl Default for ConversionMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_records_nothing() {
        let monitor = ConversionMonitor::new(false);
        monitor.begin_phase();
        monitor.finish_phase(Phase::Extract, 12);

        assert!(!monitor.is_enabled());
        assert!(monitor.phases().is_empty());
        assert_eq!(monitor.peak_memory_mb(), None);
    }

    #[test]
    fn test_phases_keep_their_counts() {
        let monitor = ConversionMonitor::new(true);
        for (phase, items) in [
            (Phase::Extract, 3),
            (Phase::Transform, 3),
            (Phase::Load, 5120),
        ] {
            monitor.begin_phase();
            monitor.finish_phase(phase, items);
        }

        let phases = monitor.phases();
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0].phase, Phase::Extract);
        assert_eq!(phases[2].items, 5120);
        assert_eq!(monitor.items_of(Phase::Load), 5120);
        assert_eq!(monitor.items_of(Phase::Extract), 3);
    }

    #[test]
    fn test_throughput() {
        let stats = PhaseStats {
            phase: Phase::Load,
            elapsed: Duration::from_millis(500),
            items: 1000,
            memory_mb: None,
        };
        assert_eq!(stats.throughput(), Some(2000.0));

        let instant = PhaseStats {
            elapsed: Duration::ZERO,
            ..stats
        };
        assert_eq!(instant.throughput(), None);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_memory_is_sampled_with_cli() {
        let monitor = ConversionMonitor::new(true);
        monitor.begin_phase();
        monitor.finish_phase(Phase::Extract, 1);

        assert!(monitor.phases()[0].memory_mb.is_some());
    }
}
