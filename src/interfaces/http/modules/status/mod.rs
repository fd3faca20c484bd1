//! Status module: uptime, memory and (simulated) CPU

pub mod handlers;

pub use handlers::*;
