use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::logs::{startup_log, LogEntry};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogsResponse {
    /// Oldest first
    pub logs: Vec<LogEntry>,
}

#[utoipa::path(
    get,
    path = "/api/logs",
    tag = "Monitoring",
    responses(
        (status = 200, description = "Recent log entries", body = LogsResponse)
    )
)]
pub async fn get_logs() -> Json<LogsResponse> {
    Json(LogsResponse {
        logs: startup_log(Utc::now()),
    })
}
