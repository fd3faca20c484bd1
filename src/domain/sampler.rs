//! Memory and CPU sampling for `/api/status`
//!
//! Memory comes from the live process. CPU usage and load are simulated
//! from a pseudo-random generator; they are placeholders, not measurements.

use std::ops::Range;
use std::sync::{Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Simulated CPU usage range, percent
pub const CPU_USAGE_RANGE: Range<f64> = 5.0..25.0;
/// Simulated load average range, per component
pub const CPU_LOAD_RANGE: Range<f64> = 0.0..0.5;

/// Raw memory figures in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemorySample {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CpuSample {
    pub usage: f64,
    pub load: [f64; 3],
}

/// Source of system figures. Swapped for a fixed implementation in tests.
pub trait SystemSampler: Send + Sync {
    fn memory(&self) -> MemorySample;
    fn cpu(&self) -> CpuSample;
}

/// Draw one simulated CPU sample.
pub fn simulate_cpu<R: Rng + ?Sized>(rng: &mut R) -> CpuSample {
    CpuSample {
        usage: rng.gen_range(CPU_USAGE_RANGE),
        load: [
            rng.gen_range(CPU_LOAD_RANGE),
            rng.gen_range(CPU_LOAD_RANGE),
            rng.gen_range(CPU_LOAD_RANGE),
        ],
    }
}

/// Sampler backed by `sysinfo` for memory and a seedable RNG for CPU.
///
/// `used` is the resident set size of this process, `total` is the host's
/// total memory.
pub struct LiveSampler {
    system: Mutex<System>,
    pid: Option<Pid>,
    rng: Mutex<StdRng>,
}

impl LiveSampler {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible CPU figures for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!("Cannot resolve current pid, process memory will read 0: {}", e);
                None
            }
        };

        Self {
            system: Mutex::new(System::new()),
            pid,
            rng: Mutex::new(rng),
        }
    }
}

impl Default for LiveSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemSampler for LiveSampler {
    fn memory(&self) -> MemorySample {
        let mut sys = lock(&self.system);
        sys.refresh_memory();

        let used_bytes = match self.pid {
            Some(pid) => {
                sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
                sys.process(pid).map(|p| p.memory()).unwrap_or(0)
            }
            None => 0,
        };

        MemorySample {
            used_bytes,
            total_bytes: sys.total_memory(),
        }
    }

    fn cpu(&self) -> CpuSample {
        simulate_cpu(&mut *lock(&self.rng))
    }
}

// A poisoned lock only means another sample panicked; the data is still usable.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
