//! Echo module: `POST /api/test` round trip

pub mod handlers;

pub use handlers::*;
