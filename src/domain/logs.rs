//! Demo log feed served by `/api/logs`

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::support::time::iso_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    pub service: String,
}

impl LogEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        level: LogLevel,
        message: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: iso_timestamp(timestamp),
            level,
            message: message.into(),
            service: service.into(),
        }
    }
}

/// `(seconds before now, message, service)`, oldest first
const STARTUP_LOG: [(i64, &str, &str); 5] = [
    (30, "Application started successfully", "main"),
    (25, "Database connection established", "database"),
    (20, "Redis cache connected", "cache"),
    (15, "Health check endpoint registered", "health"),
    (10, "API endpoints initialized", "api"),
];

/// Fixed startup log, timestamped relative to `now`.
pub fn startup_log(now: DateTime<Utc>) -> Vec<LogEntry> {
    STARTUP_LOG
        .iter()
        .map(|(ago, message, service)| {
            LogEntry::new(now - Duration::seconds(*ago), LogLevel::Info, *message, *service)
        })
        .collect()
}
