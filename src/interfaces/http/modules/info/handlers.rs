use std::sync::Arc;

use axum::{extract::State, Json};

use crate::domain::AppInfo;

#[derive(Clone)]
pub struct InfoState {
    pub app_info: Arc<AppInfo>,
}

#[utoipa::path(
    get,
    path = "/api/info",
    tag = "Application",
    responses(
        (status = 200, description = "Application name, version and build", body = AppInfo)
    )
)]
pub async fn get_app_info(State(state): State<InfoState>) -> Json<AppInfo> {
    Json(AppInfo::clone(&state.app_info))
}
