//! # Idena Node API Client
//!
//! One method per node RPC method. Scalar arguments go out as positional
//! parameters, record arguments as a single object parameter, and the
//! `result` of the reply is returned as-is.

use serde::Serialize;
use serde_json::{json, Value};

use super::models::{ActivateInviteArgs, BaseTxArgs, SendInviteArgs, SendTxArgs, TransactionsArgs};
use super::rpccall::RpcCall;
use crate::retrieve::error::ApiError;
use crate::retrieve::ky_http::ClientOptions;

/// Default node host.
pub const IDENA_API_URL: &str = "http://localhost";
/// Default node RPC port.
pub const IDENA_API_PORT: u16 = 9009;

/// Joins a host URL and port into a node URL (`http://localhost` + `9009`).
pub fn node_url(api_url: &str, api_port: u16) -> String {
    format!("{}:{}/", api_url.trim_end_matches('/'), api_port)
}

/// Client for an Idena node's JSON-RPC interface.
#[derive(Clone)]
pub struct IdenaApi {
    rpc: RpcCall,
}

impl IdenaApi {
    /// Client for the local node on the default port.
    pub fn new(api_key: Option<String>) -> Result<Self, ApiError> {
        Self::with_options(&node_url(IDENA_API_URL, IDENA_API_PORT), api_key, ClientOptions::default())
    }

    /// Client for the node at `url` (host and port included).
    pub fn with_options(url: &str, api_key: Option<String>, options: ClientOptions) -> Result<Self, ApiError> {
        Ok(Self {
            rpc: RpcCall::new(url, api_key, options)?,
        })
    }

    /// The node URL requests are posted to.
    pub fn node_url(&self) -> &url::Url {
        self.rpc.node_url()
    }

    /// Calls any RPC method with raw positional parameters.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ApiError> {
        self.rpc.call(method, params).await
    }

    async fn call_with<A: Serialize>(&self, method: &str, args: &A) -> Result<Value, ApiError> {
        let arg = serde_json::to_value(args).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.rpc.call(method, vec![arg]).await
    }

    //---------- DNA ----------//

    /// All identities known to the node.
    pub async fn identities(&self) -> Result<Value, ApiError> {
        self.call("dna_identities", vec![]).await
    }

    /// Identity state of `address`.
    pub async fn identity(&self, address: &str) -> Result<Value, ApiError> {
        self.call("dna_identity", vec![json!(address)]).await
    }

    /// Current epoch and next validation time.
    pub async fn epoch(&self) -> Result<Value, ApiError> {
        self.call("dna_epoch", vec![]).await
    }

    /// Durations of the validation ceremony phases.
    pub async fn ceremony_intervals(&self) -> Result<Value, ApiError> {
        self.call("dna_ceremonyIntervals", vec![]).await
    }

    /// Balance and stake of `address`.
    pub async fn get_balance(&self, address: &str) -> Result<Value, ApiError> {
        self.call("dna_getBalance", vec![json!(address)]).await
    }

    /// The node's coinbase address.
    pub async fn get_coinbase_addr(&self) -> Result<Value, ApiError> {
        self.call("dna_getCoinbaseAddr", vec![]).await
    }

    /// Node software version.
    pub async fn node_version(&self) -> Result<Value, ApiError> {
        self.call("dna_version", vec![]).await
    }

    /// Sends a transaction signed by the node's own key; returns its hash.
    pub async fn send_transaction(&self, args: &SendTxArgs) -> Result<Value, ApiError> {
        self.call_with("dna_sendTransaction", args).await
    }

    /// Issues an invitation.
    pub async fn send_invite(&self, args: &SendInviteArgs) -> Result<Value, ApiError> {
        self.call_with("dna_sendInvite", args).await
    }

    /// Activates an invitation.
    pub async fn activate_invite(&self, args: &ActivateInviteArgs) -> Result<Value, ApiError> {
        self.call_with("dna_activateInvite", args).await
    }

    /// Starts mining.
    pub async fn become_online(&self, args: &BaseTxArgs) -> Result<Value, ApiError> {
        self.call_with("dna_becomeOnline", args).await
    }

    /// Stops mining.
    pub async fn become_offline(&self, args: &BaseTxArgs) -> Result<Value, ApiError> {
        self.call_with("dna_becomeOffline", args).await
    }

    //---------- BCN ----------//

    /// Head block.
    pub async fn last_block(&self) -> Result<Value, ApiError> {
        self.call("bcn_lastBlock", vec![]).await
    }

    /// Block at `height`.
    pub async fn block_at(&self, height: u64) -> Result<Value, ApiError> {
        self.call("bcn_blockAt", vec![json!(height)]).await
    }

    /// Block by hash.
    pub async fn block(&self, hash: &str) -> Result<Value, ApiError> {
        self.call("bcn_block", vec![json!(hash)]).await
    }

    /// Transaction by hash.
    pub async fn transaction(&self, hash: &str) -> Result<Value, ApiError> {
        self.call("bcn_transaction", vec![json!(hash)]).await
    }

    /// One page of mined transactions for an address.
    pub async fn transactions(&self, args: &TransactionsArgs) -> Result<Value, ApiError> {
        self.call_with("bcn_transactions", args).await
    }

    /// One page of pending transactions for an address.
    pub async fn pending_transactions(&self, args: &TransactionsArgs) -> Result<Value, ApiError> {
        self.call_with("bcn_pendingTransactions", args).await
    }

    /// Sync progress.
    pub async fn syncing(&self) -> Result<Value, ApiError> {
        self.call("bcn_syncing", vec![]).await
    }

    /// Hashes of mempool transactions sent from `address`.
    pub async fn mempool(&self, address: &str) -> Result<Value, ApiError> {
        self.call("bcn_mempool", vec![json!(address)]).await
    }

    //---------- NET ----------//

    /// Connected peers.
    pub async fn peers(&self) -> Result<Value, ApiError> {
        self.call("net_peers", vec![]).await
    }

    /// The node's IPFS address.
    pub async fn ipfs_address(&self) -> Result<Value, ApiError> {
        self.call("net_ipfsAddress", vec![]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_url_joins_host_and_port() {
        assert_eq!(node_url("http://localhost", 9009), "http://localhost:9009/");
        assert_eq!(node_url("http://10.0.0.5/", 9119), "http://10.0.0.5:9119/");
    }

    #[test]
    fn default_client_targets_local_node() {
        let api = IdenaApi::new(None).unwrap();
        assert_eq!(api.node_url().as_str(), "http://localhost:9009/");
    }
}
