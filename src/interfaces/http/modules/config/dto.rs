//! Config DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::AppConfig;

pub const CONFIGURED: &str = "configured";
pub const NOT_CONFIGURED: &str = "not configured";

/// Flattened view of the recognized environment.
///
/// Connection strings are replaced by a presence marker and never echoed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConfigResponse {
    pub port: String,
    pub node_env: String,
    pub log_level: String,
    /// `configured` or `not configured`
    pub database_url: String,
    /// `configured` or `not configured`
    pub redis_url: String,
}

impl From<&AppConfig> for ConfigResponse {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            port: cfg.port.to_string(),
            node_env: cfg.environment.clone(),
            log_level: cfg.log_level.clone(),
            database_url: redact(cfg.database_configured()),
            redis_url: redact(cfg.redis_configured()),
        }
    }
}

fn redact(present: bool) -> String {
    let marker = if present { CONFIGURED } else { NOT_CONFIGURED };
    marker.to_string()
}
