//! Shared utilities for stock-risk
//!
//! This crate provides the ambient pieces used across the workspace:
//! tracing setup and environment-driven application configuration.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, LogFormat};
pub use logging::{init_tracing, init_tracing_with};
