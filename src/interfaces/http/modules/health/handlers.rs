//! Health check handler

use axum::{extract::State, Json};
use chrono::Utc;

use crate::domain::{DependencyChecks, HealthCheck};
use crate::support::time::StartTime;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub started_at: StartTime,
}

/// Dependency checks are not probed, so this always reports `healthy`.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> Json<HealthCheck> {
    let uptime = state.started_at.uptime_secs();
    tracing::debug!(uptime, "Health check");

    Json(HealthCheck::new(
        Utc::now(),
        uptime,
        DependencyChecks::all_healthy(),
    ))
}
