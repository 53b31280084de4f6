//! # Financial Market APIs Module
//!
//! This module groups the clients for market-data providers. Its purpose is
//! to hide each provider's URL layout behind plain methods that return the
//! provider's JSON unchanged.
//!
//! ## Contained Modules:
//!
//! - **`coingecko`**: Client for the CoinGecko v3 REST API (simple prices,
//!   coins, market charts, exchanges).

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Client for interacting with the CoinGecko REST API.
pub mod coingecko;
