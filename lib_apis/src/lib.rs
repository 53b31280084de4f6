//! # lib_apis
//!
//! Thin async clients for two remote APIs: the CoinGecko market-data REST
//! API and an Idena node's JSON-RPC interface. Every operation builds one
//! request, sends it through the shared retrying [`retrieve::ApiClient`] and
//! returns the decoded JSON, or an [`retrieve::ApiError`].
//!
//! Modules are gated behind cargo features the same way across the
//! workspace; `full` (the default) enables everything.

#![forbid(unsafe_code)]

#[cfg(feature = "retrieve")]
pub mod retrieve;

#[cfg(feature = "markets")]
pub mod markets;

#[cfg(feature = "chains")]
pub mod chains;

#[cfg(feature = "configs")]
pub mod configs;

#[cfg(feature = "loggers")]
pub mod loggers;

#[cfg(feature = "retrieve")]
pub use retrieve::{ApiError, ErrorRecord, QueryParams};
