//! Shared utilities for stock-dashboard
//!
//! This crate provides the ambient pieces the other crates share:
//! tracing setup and environment loading.

pub mod config;
pub mod logging;

pub use config::{EnvSource, ProcessEnv, load_dotenv};
pub use logging::{DEFAULT_FILTER, init_tracing};
