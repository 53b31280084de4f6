//! # Blockchain Node APIs Module
//!
//! Clients for blockchain nodes reached over JSON-RPC.
//!
//! ## Contained Modules:
//!
//! - **`idena`**: JSON-RPC client for an Idena node (`dna_*`, `bcn_*`,
//!   `net_*` methods).

#![forbid(unsafe_code)]

/// Client for an Idena node's JSON-RPC interface.
pub mod idena;
