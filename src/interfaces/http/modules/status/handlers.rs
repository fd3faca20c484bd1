//! System status handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::domain::{SystemSampler, SystemStatus};
use crate::support::time::StartTime;

#[derive(Clone)]
pub struct StatusState {
    pub started_at: StartTime,
    pub sampler: Arc<dyn SystemSampler>,
}

/// Memory is read from this process; CPU usage and load are simulated.
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "Monitoring",
    responses(
        (status = 200, description = "Uptime, memory and CPU figures", body = SystemStatus)
    )
)]
pub async fn get_system_status(State(state): State<StatusState>) -> Json<SystemStatus> {
    let memory = state.sampler.memory();
    let cpu = state.sampler.cpu();
    let status = SystemStatus::new(state.started_at.uptime_secs(), &memory, cpu);

    tracing::debug!(
        used = %status.memory.used,
        total = %status.memory.total,
        percentage = status.memory.percentage,
        "System status sampled"
    );

    Json(status)
}
