//! Payloads served by the API and the rules that produce them

pub mod health;
pub mod info;
pub mod logs;
pub mod sampler;
pub mod status;
pub mod test_request;

pub use health::{CheckStatus, DependencyChecks, HealthCheck, HealthStatus};
pub use info::{AppInfo, BuildInfo};
pub use logs::{LogEntry, LogLevel};
pub use sampler::{CpuSample, LiveSampler, MemorySample, SystemSampler};
pub use status::{CpuUsage, MemoryUsage, SystemStatus};
pub use test_request::{Issue, IssueCode, TestRequest, TestResponse, ValidationError};
