//! # Configuration Modules
//!
//! Endpoint and HTTP-policy configuration for the API clients.

/// Defaults, JSON5 file loading and environment overrides.
pub mod config_apis;

pub use config_apis::{load_apis_config, ApisConfig, CoinGeckoConfig, ConfigError, HttpConfig, IdenaConfig};
