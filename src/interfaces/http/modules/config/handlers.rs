use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::ConfigResponse;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct ConfigState {
    pub config: Arc<AppConfig>,
}

#[utoipa::path(
    get,
    path = "/api/config",
    tag = "Application",
    responses(
        (status = 200, description = "Effective configuration, secrets redacted", body = ConfigResponse)
    )
)]
pub async fn get_config(State(state): State<ConfigState>) -> Json<ConfigResponse> {
    Json(ConfigResponse::from(state.config.as_ref()))
}
