//! Config module: effective configuration with secrets redacted

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
