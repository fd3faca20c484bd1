//! Logs module: fixed demo log feed

pub mod handlers;

pub use handlers::*;
