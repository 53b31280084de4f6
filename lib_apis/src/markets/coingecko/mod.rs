//! # CoinGecko API Integration Module
//!
//! - **`apicallcoingecko`**: The REST client, one method per endpoint.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// CoinGecko REST client.
pub mod apicallcoingecko;

pub use apicallcoingecko::{ApiCallCoinGecko, COINGECKO_API_URL};
