//! # Container Test App
//!
//! A small JSON status API for checking that a container boots, reads its
//! environment and answers HTTP.
//!
//! ## Layout
//!
//! - **domain**: response payloads, request validation, system sampling
//! - **config**: environment-driven configuration
//! - **interfaces**: HTTP handlers, router, OpenAPI documentation
//! - **server**: server lifecycle and logging setup
//! - **support**: shutdown coordination, time helpers, error types

pub mod config;
pub mod domain;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::AppConfig;
pub use interfaces::http::{create_api_router, AppState};
pub use server::{init_tracing, ServerHandle, ServerOptions};
pub use support::errors::ServerError;
