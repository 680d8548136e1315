//! Configuration utilities.

/// TOML + environment configuration.
pub mod config;
