//! Server runtime.
//!
//! [`ServerHandle`] owns the HTTP listener task and the shutdown
//! coordinator. The binary starts it, installs signal handling and waits;
//! tests can start it on port 0 and shut it down directly.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::domain::{LiveSampler, SystemSampler};
use crate::interfaces::http::{create_api_router, AppState};
use crate::support::errors::ServerError;
use crate::support::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the server.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Memory/CPU source for `/api/status`. Defaults to [`LiveSampler`].
    pub sampler: Option<Arc<dyn SystemSampler>>,
}

impl ServerOptions {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            sampler: None,
        }
    }

    pub fn with_sampler(mut self, sampler: Arc<dyn SystemSampler>) -> Self {
        self.sampler = Some(sampler);
        self
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running server.
///
/// # Examples
///
/// ```rust,no_run
/// use container_test_app::server::{ServerHandle, ServerOptions};
/// use container_test_app::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = AppConfig::from_env()?;
///     let handle = ServerHandle::start(ServerOptions::new(config)).await?;
///     handle.install_signal_handler();
///     handle.wait().await?;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Address the listener is bound to (resolves port 0).
    pub local_addr: SocketAddr,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    /// Bind the listener and start serving in a background task.
    pub async fn start(opts: ServerOptions) -> Result<Self, ServerError> {
        let config = opts.config;
        info!(
            "Starting container-test-app v{} ({})",
            config.app_version, config.environment
        );

        let sampler = opts
            .sampler
            .unwrap_or_else(|| Arc::new(LiveSampler::new()));
        let shutdown = ShutdownCoordinator::new(config.shutdown_timeout);
        let addr = config.address();

        let router = create_api_router(AppState::new(config, sampler));

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move { api_server.await });

        info!("🚀 Server started.");

        Ok(Self {
            local_addr,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }

    /// Wait until shutdown is triggered and in-flight requests have drained,
    /// or until the server stops on its own.
    pub async fn wait(self) -> Result<(), ServerError> {
        let Self {
            shutdown,
            mut api_task,
            ..
        } = self;

        let stop = shutdown.signal();
        tokio::select! {
            result = &mut api_task => {
                let outcome = task_outcome(result);
                if let Err(e) = &outcome {
                    error!("REST API server error: {}", e);
                }
                return outcome;
            }
            _ = stop.wait() => {}
        }

        let mut outcome = Ok(());
        let drained = shutdown
            .drain(async {
                outcome = task_outcome((&mut api_task).await);
            })
            .await;

        if !drained {
            warn!("Aborting REST API server with requests still in flight");
            api_task.abort();
        }

        info!("👋 container-test-app shutdown complete");
        outcome
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) -> Result<(), ServerError> {
        self.trigger_shutdown();
        self.wait().await
    }
}

fn task_outcome(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), ServerError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ServerError::Serve(e)),
        Err(e) => Err(ServerError::Task(e)),
    }
}

// ── Logging ────────────────────────────────────────────────────────

/// Initialize tracing from the application config.
///
/// `RUST_LOG` takes precedence over `LOG_LEVEL`. Call once at startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = log_filter(std::env::var("RUST_LOG").ok(), &config.log_level);

    if json_output(config) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

// Falls back to `info` when neither directive parses.
fn log_filter(rust_log: Option<String>, log_level: &str) -> EnvFilter {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_new(log_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn json_output(config: &AppConfig) -> bool {
    config.log_format.eq_ignore_ascii_case("json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn local_config() -> AppConfig {
        AppConfig::default().with_overrides(Some("127.0.0.1".into()), Some(0))
    }

    #[tokio::test]
    async fn serves_health_over_tcp_and_shuts_down() {
        let handle = ServerHandle::start(ServerOptions::new(local_config()))
            .await
            .unwrap();
        assert!(handle.is_running());

        let mut stream = tokio::net::TcpStream::connect(handle.local_addr)
            .await
            .unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("\"status\":\"healthy\""));

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn wait_returns_when_shutdown_is_signalled_elsewhere() {
        let handle = ServerHandle::start(ServerOptions::new(local_config()))
            .await
            .unwrap();
        let signal = handle.shutdown_signal();
        let waiter = tokio::spawn(handle.wait());

        tokio::task::yield_now().await;
        signal.trigger();

        tokio::time::timeout(std::time::Duration::from_secs(5), waiter)
            .await
            .expect("server should stop")
            .unwrap()
            .unwrap();
    }

    #[test]
    fn rust_log_takes_precedence_over_log_level() {
        assert_eq!(log_filter(Some("warn".into()), "debug").to_string(), "warn");
        assert_eq!(log_filter(None, "debug").to_string(), "debug");
        assert_eq!(log_filter(Some("  ".into()), "debug").to_string(), "debug");
    }

    #[test]
    fn unparseable_log_level_falls_back_to_info() {
        assert_eq!(log_filter(None, "app=verbose").to_string(), "info");
    }

    #[test]
    fn log_format_selects_json_case_insensitively() {
        let mut cfg = AppConfig::default();
        assert!(!json_output(&cfg));
        cfg.log_format = "JSON".into();
        assert!(json_output(&cfg));
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let first = ServerHandle::start(ServerOptions::new(local_config()))
            .await
            .unwrap();
        let taken = AppConfig::default()
            .with_overrides(Some("127.0.0.1".into()), Some(first.local_addr.port()));

        let err = ServerHandle::start(ServerOptions::new(taken))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ServerError::Bind { .. }));

        first.shutdown().await.unwrap();
    }
}
