//! Configuration module
//!
//! All settings come from environment variables and are read once at
//! startup. Secrets (`DATABASE_URL`, `REDIS_URL`) are kept only so their
//! presence can be reported; their values never leave this module.

use std::collections::HashMap;

use envconfig::Envconfig;

/// Application configuration
#[derive(Debug, Clone, Envconfig)]
pub struct AppConfig {
    /// Listen address
    #[envconfig(from = "HOST", default = "0.0.0.0")]
    pub host: String,
    /// Listen port
    #[envconfig(from = "PORT", default = "5000")]
    pub port: u16,
    /// Deployment environment name
    #[envconfig(from = "NODE_ENV", default = "development")]
    pub environment: String,
    /// Log filter used when `RUST_LOG` is not set
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: String,
    /// Log output format: `pretty` or `json`
    #[envconfig(from = "LOG_FORMAT", default = "pretty")]
    pub log_format: String,
    #[envconfig(from = "DATABASE_URL")]
    database_url: Option<String>,
    #[envconfig(from = "REDIS_URL")]
    redis_url: Option<String>,
    #[envconfig(from = "APP_VERSION", default = "1.0.0")]
    pub app_version: String,
    #[envconfig(from = "BUILD_TIMESTAMP")]
    pub build_timestamp: Option<String>,
    #[envconfig(from = "GIT_COMMIT", default = "local-dev")]
    pub git_commit: String,
    #[envconfig(from = "GIT_BRANCH", default = "main")]
    pub git_branch: String,
    /// Upper bound on graceful shutdown, in seconds
    #[envconfig(from = "SHUTDOWN_TIMEOUT_SECS", default = "30")]
    pub shutdown_timeout: u64,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, envconfig::Error> {
        Self::init_from_env()
    }

    /// Read configuration from an explicit variable map.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, envconfig::Error> {
        Self::init_from_hashmap(vars)
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_configured(&self) -> bool {
        is_set(&self.database_url)
    }

    pub fn redis_configured(&self) -> bool {
        is_set(&self.redis_url)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            database_url: None,
            redis_url: None,
            app_version: "1.0.0".to_string(),
            build_timestamp: None,
            git_commit: "local-dev".to_string(),
            git_branch: "main".to_string(),
            shutdown_timeout: 30,
        }
    }
}

// An empty variable counts as unset.
fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}
