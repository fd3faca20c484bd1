//! System status payload

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::sampler::{CpuSample, MemorySample};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Memory usage in whole megabytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemoryUsage {
    /// e.g. `"42MB"`
    pub used: String,
    /// e.g. `"512MB"`
    pub total: String,
    /// `round(used / total * 100)`, computed from the whole-MB values
    pub percentage: u32,
}

impl MemoryUsage {
    pub fn from_sample(sample: &MemorySample) -> Self {
        let used_mb = to_mb(sample.used_bytes);
        let total_mb = to_mb(sample.total_bytes);

        Self {
            used: format!("{}MB", used_mb),
            total: format!("{}MB", total_mb),
            percentage: percentage(used_mb, total_mb),
        }
    }
}

/// CPU figures. Simulated, not measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CpuUsage {
    /// Percent
    pub usage: f64,
    /// 1, 5 and 15 minute load placeholders
    #[schema(value_type = Vec<f64>)]
    pub load: [f64; 3],
}

impl From<CpuSample> for CpuUsage {
    fn from(sample: CpuSample) -> Self {
        Self {
            usage: sample.usage,
            load: sample.load,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SystemStatus {
    /// Whole seconds since process start
    pub uptime: u64,
    pub memory: MemoryUsage,
    pub cpu: CpuUsage,
}

impl SystemStatus {
    pub fn new(uptime: u64, memory: &MemorySample, cpu: CpuSample) -> Self {
        Self {
            uptime,
            memory: MemoryUsage::from_sample(memory),
            cpu: cpu.into(),
        }
    }
}

fn to_mb(bytes: u64) -> u64 {
    (bytes as f64 / BYTES_PER_MB).round() as u64
}

/// Zero total reports 0%.
pub fn percentage(used_mb: u64, total_mb: u64) -> u32 {
    if total_mb == 0 {
        return 0;
    }
    ((used_mb as f64 / total_mb as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn memory_is_reported_in_whole_megabytes() {
        let mem = MemoryUsage::from_sample(&MemorySample {
            used_bytes: 42 * MB + MB / 4,
            total_bytes: 128 * MB,
        });
        assert_eq!(mem.used, "42MB");
        assert_eq!(mem.total, "128MB");
        assert_eq!(mem.percentage, 33);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(50, 50), 100);
    }

    #[test]
    fn zero_total_reports_zero_percent() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(10, 0), 0);
    }

    #[test]
    fn status_carries_cpu_sample_through() {
        let status = SystemStatus::new(
            7,
            &MemorySample {
                used_bytes: 10 * MB,
                total_bytes: 100 * MB,
            },
            CpuSample {
                usage: 12.5,
                load: [0.1, 0.2, 0.3],
            },
        );
        assert_eq!(status.uptime, 7);
        assert_eq!(status.memory.percentage, 10);
        assert_eq!(status.cpu.usage, 12.5);
        assert_eq!(status.cpu.load, [0.1, 0.2, 0.3]);
    }
}
