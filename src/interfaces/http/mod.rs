//! HTTP REST API interfaces
//!
//! - `common`: error responses and the validated JSON extractor
//! - `modules`: one handler module per endpoint, plus request-id middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, AppState};
