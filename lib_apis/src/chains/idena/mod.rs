//! # Idena Node Integration Module
//!
//! - **`rpccall`**: JSON-RPC envelope and dispatch over the shared `ApiClient`.
//! - **`models`**: Object parameters of the transaction and paging methods.
//! - **`apicallidena`**: `IdenaApi`, one method per node RPC method.

pub mod apicallidena;
pub mod models;
pub mod rpccall;

pub use apicallidena::{node_url, IdenaApi, IDENA_API_PORT, IDENA_API_URL};
pub use models::{ActivateInviteArgs, BaseTxArgs, SendInviteArgs, SendTxArgs, TransactionsArgs};
pub use rpccall::{RpcCall, RpcErrorObject, RpcRequest, RpcResponse, RPC_REQUEST_ID};
