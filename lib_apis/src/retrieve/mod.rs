//! # Data Retrieval Module
//!
//! This module provides the single request dispatcher shared by every remote
//! surface in the crate, primarily focused on HTTP-based interactions.
//!
//! ## Contained Modules:
//!
//! - **`ky_http`**: A generic HTTP `ApiClient` built on `reqwest` and
//!   `reqwest-middleware`, featuring a bounded timeout and automatic retries
//!   with exponential backoff. The CoinGecko and Idena clients sit on it.
//! - **`query`**: Ordered query-string parameters; list values are
//!   comma-joined.
//! - **`error`**: The uniform `ApiError` and its `{message, code}` record.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Uniform error type and `{message, code}` record.
pub mod error;
/// Generic HTTP API client with retry middleware for resilient network requests.
pub mod ky_http;
/// Query-string parameter builder.
pub mod query;

pub use error::{ApiError, ErrorRecord};
pub use ky_http::{ApiClient, ApiResponse, ClientOptions};
pub use query::{comma_separated, ParamValue, QueryParams};
