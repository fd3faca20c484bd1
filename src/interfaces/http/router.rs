//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::domain::{
    AppInfo, BuildInfo, CheckStatus, CpuUsage, DependencyChecks, HealthCheck, HealthStatus, Issue,
    IssueCode, LogEntry, LogLevel, MemoryUsage, SystemSampler, SystemStatus, TestRequest,
    TestResponse,
};
use crate::interfaces::http::common::ErrorResponse;
use crate::support::time::StartTime;

use super::modules::request_id::request_id_middleware;
use super::modules::{config, echo, health, info, logs, pages, status};

/// Process-wide state, fixed at startup.
/// Axum extracts each handler's own state via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub started_at: StartTime,
    pub config: Arc<AppConfig>,
    pub app_info: Arc<AppInfo>,
    pub sampler: Arc<dyn SystemSampler>,
}

impl AppState {
    pub fn new(config: AppConfig, sampler: Arc<dyn SystemSampler>) -> Self {
        let started_at = StartTime::now();
        let app_info = AppInfo::from_config(&config, started_at.wall());

        Self {
            started_at,
            config: Arc::new(config),
            app_info: Arc::new(app_info),
            sampler,
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            started_at: s.started_at,
        }
    }
}

impl FromRef<AppState> for info::InfoState {
    fn from_ref(s: &AppState) -> Self {
        info::InfoState {
            app_info: Arc::clone(&s.app_info),
        }
    }
}

impl FromRef<AppState> for status::StatusState {
    fn from_ref(s: &AppState) -> Self {
        status::StatusState {
            started_at: s.started_at,
            sampler: Arc::clone(&s.sampler),
        }
    }
}

impl FromRef<AppState> for config::ConfigState {
    fn from_ref(s: &AppState) -> Self {
        config::ConfigState {
            config: Arc::clone(&s.config),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        pages::welcome,
        health::health_check,
        info::get_app_info,
        status::get_system_status,
        config::get_config,
        logs::get_logs,
        echo::process_test_request,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthCheck,
            HealthStatus,
            CheckStatus,
            DependencyChecks,
            AppInfo,
            BuildInfo,
            SystemStatus,
            MemoryUsage,
            CpuUsage,
            config::ConfigResponse,
            logs::LogsResponse,
            LogEntry,
            LogLevel,
            TestRequest,
            TestResponse,
            Issue,
            IssueCode,
        )
    ),
    tags(
        (name = "Pages", description = "Static HTML"),
        (name = "Health", description = "Liveness check"),
        (name = "Application", description = "Application metadata and configuration"),
        (name = "Monitoring", description = "Runtime status and logs"),
        (name = "Testing", description = "Request validation round trip"),
    ),
    info(
        title = "Container Test App API",
        version = "1.0.0",
        description = "Health, status and configuration endpoints for container smoke tests",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/info", get(info::get_app_info))
        .route("/status", get(status::get_system_status))
        .route("/config", get(config::get_config))
        .route("/logs", get(logs::get_logs))
        .route("/test", post(echo::process_test_request));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        .route("/", get(pages::welcome))
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .fallback(pages::not_found)
        .with_state(state)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tower::ServiceExt;

    use crate::domain::{CpuSample, MemorySample};

    const MB: u64 = 1024 * 1024;

    struct FixedSampler {
        memory: MemorySample,
        cpu: CpuSample,
    }

    impl SystemSampler for FixedSampler {
        fn memory(&self) -> MemorySample {
            self.memory
        }

        fn cpu(&self) -> CpuSample {
            self.cpu
        }
    }

    fn fixed_sampler() -> Arc<dyn SystemSampler> {
        Arc::new(FixedSampler {
            memory: MemorySample {
                used_bytes: 45 * MB,
                total_bytes: 128 * MB,
            },
            cpu: CpuSample {
                usage: 11.0,
                load: [0.1, 0.2, 0.3],
            },
        })
    }

    fn app_with_env(vars: &[(&str, &str)]) -> Router {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = AppConfig::from_map(&vars).unwrap();
        create_api_router(AppState::new(config, fixed_sampler()))
    }

    fn app() -> Router {
        app_with_env(&[])
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read_json(resp).await
    }

    async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        read_json(resp).await
    }

    async fn read_json(resp: axum::response::Response) -> (StatusCode, Value) {
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_always_healthy() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["uptime"].as_u64().is_some());
        for check in ["database", "redis", "external_api", "filesystem"] {
            assert_eq!(body["checks"][check], "healthy");
        }
    }

    #[tokio::test]
    async fn uptime_does_not_decrease_across_calls() {
        let app = app();
        let mut last = 0;
        for _ in 0..3 {
            let (_, body) = get_json(app.clone(), "/health").await;
            let uptime = body["uptime"].as_u64().unwrap();
            assert!(uptime >= last);
            last = uptime;
        }
    }

    #[tokio::test]
    async fn info_reports_configured_version() {
        let (_, body) = get_json(app_with_env(&[("APP_VERSION", "2.3.1")]), "/api/info").await;
        assert_eq!(body["version"], "2.3.1");
        assert_eq!(body["name"], "container-test-app");
    }

    #[tokio::test]
    async fn info_defaults_version() {
        let (status, body) = get_json(app(), "/api/info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["environment"], "development");
        assert_eq!(body["build"]["commit"], "local-dev");
        assert_eq!(body["build"]["branch"], "main");
    }

    #[tokio::test]
    async fn status_percentage_matches_used_and_total() {
        let (status, body) = get_json(app(), "/api/status").await;
        assert_eq!(status, StatusCode::OK);

        let used: f64 = body["memory"]["used"]
            .as_str()
            .unwrap()
            .trim_end_matches("MB")
            .parse()
            .unwrap();
        let total: f64 = body["memory"]["total"]
            .as_str()
            .unwrap()
            .trim_end_matches("MB")
            .parse()
            .unwrap();
        assert_eq!(body["memory"]["used"], "45MB");
        assert_eq!(
            body["memory"]["percentage"].as_u64().unwrap(),
            (used / total * 100.0).round() as u64
        );
        assert_eq!(body["cpu"]["usage"], 11.0);
        assert_eq!(body["cpu"]["load"], json!([0.1, 0.2, 0.3]));
    }

    #[tokio::test]
    async fn config_redacts_connection_strings() {
        let app = app_with_env(&[
            ("DATABASE_URL", "postgres://u:p4ss@db/app"),
            ("REDIS_URL", "redis://:s3cret@cache:6379"),
            ("LOG_LEVEL", "debug"),
        ]);
        let (status, body) = get_json(app, "/api/config").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database_url"], "configured");
        assert_eq!(body["redis_url"], "configured");
        assert_eq!(body["log_level"], "debug");
        assert_eq!(body["port"], "5000");
        let text = body.to_string();
        assert!(!text.contains("p4ss"));
        assert!(!text.contains("s3cret"));
    }

    #[tokio::test]
    async fn config_without_secrets() {
        let (_, body) = get_json(app(), "/api/config").await;
        assert_eq!(body["database_url"], "not configured");
        assert_eq!(body["redis_url"], "not configured");
        assert_eq!(body["node_env"], "development");
    }

    #[tokio::test]
    async fn logs_returns_fixed_feed() {
        let (status, body) = get_json(app(), "/api/logs").await;
        assert_eq!(status, StatusCode::OK);
        let logs = body["logs"].as_array().unwrap();
        assert_eq!(logs.len(), 5);
        assert_eq!(logs[0]["service"], "main");
        assert_eq!(logs[0]["level"], "info");
    }

    #[tokio::test]
    async fn test_endpoint_echoes_data() {
        let (status, body) = post_json(
            app(),
            "/api/test",
            &json!({"data": "hello", "timestamp": "2024-01-01T00:00:00Z", "source": "x"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], "hello");

        let id = body["id"].as_str().unwrap();
        let suffix = id.strip_prefix("req-").unwrap();
        assert_eq!(suffix.len(), 7);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!(body["processed_at"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_endpoint_keeps_caller_request_id() {
        let body = json!({"data": "hello", "timestamp": "2024-01-01T00:00:00Z", "source": "x"});
        let resp = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/test")
                    .header("content-type", "application/json")
                    .header("x-request-id", "trace-42")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.headers()["x-request-id"], "trace-42");
        let (status, body) = read_json(resp).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "hello");
    }

    #[tokio::test]
    async fn test_endpoint_rejects_missing_field() {
        let (status, body) = post_json(
            app(),
            "/api/test",
            &json!({"data": "hello", "timestamp": "2024-01-01T00:00:00Z"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid request data");
        assert_eq!(body["details"][0]["path"], json!(["source"]));
    }

    #[tokio::test]
    async fn test_endpoint_rejects_wrong_type() {
        let (status, body) = post_json(
            app(),
            "/api/test",
            &json!({"data": 1, "timestamp": "2024-01-01T00:00:00Z", "source": "x"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["details"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn welcome_page_is_html() {
        let resp = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let ct = resp.headers()["content-type"].to_str().unwrap();
        assert!(ct.starts_with("text/html"));
    }

    #[tokio::test]
    async fn unknown_route_is_json_404_with_request_id() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/api/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(resp.headers().contains_key("x-request-id"));
        let (status, body) = read_json(resp).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Not found: /api/nope");
    }

    #[tokio::test]
    async fn openapi_document_lists_endpoints() {
        let (status, body) = get_json(app(), "/api-doc/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/test"]["post"].is_object());
        assert!(body["paths"]["/health"]["get"].is_object());
    }
}
