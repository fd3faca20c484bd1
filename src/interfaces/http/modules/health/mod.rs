//! Health module: liveness for container orchestrators

pub mod handlers;

pub use handlers::*;
