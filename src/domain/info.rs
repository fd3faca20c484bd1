//! Application info payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::AppConfig;
use crate::support::time::iso_timestamp;

/// Name reported by `/api/info`
pub const APP_NAME: &str = "container-test-app";

/// Build metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BuildInfo {
    pub timestamp: String,
    pub commit: String,
    pub branch: String,
}

/// Static application info, fixed at process start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub build: BuildInfo,
}

impl AppInfo {
    /// Build the info record from configuration. `started_at` stands in for
    /// the build timestamp when `BUILD_TIMESTAMP` is not set.
    pub fn from_config(config: &AppConfig, started_at: DateTime<Utc>) -> Self {
        Self {
            name: APP_NAME.to_string(),
            version: config.app_version.clone(),
            environment: config.environment.clone(),
            build: BuildInfo {
                timestamp: config
                    .build_timestamp
                    .clone()
                    .unwrap_or_else(|| iso_timestamp(started_at)),
                commit: config.git_commit.clone(),
                branch: config.git_branch.clone(),
            },
        }
    }
}
