use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Process start, captured once and never changed.
///
/// Uptime is measured on the monotonic clock so it cannot go backwards when
/// the wall clock is adjusted.
#[derive(Debug, Clone, Copy)]
pub struct StartTime {
    instant: Instant,
    wall: DateTime<Utc>,
}

impl StartTime {
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
            wall: Utc::now(),
        }
    }

    /// Whole seconds since start
    pub fn uptime_secs(&self) -> u64 {
        self.instant.elapsed().as_secs()
    }

    pub fn wall(&self) -> DateTime<Utc> {
        self.wall
    }
}
