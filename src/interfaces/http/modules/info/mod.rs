//! Info module: static application and build metadata

pub mod handlers;

pub use handlers::*;
