//! # JSON-RPC Dispatch
//!
//! Posts `{"method", "params", "id", "key"}` envelopes to a node and unwraps
//! the `{result | error}` reply. One call, one HTTP request; nothing is
//! batched and no state survives between calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::retrieve::error::ApiError;
use crate::retrieve::ky_http::{ApiClient, ClientOptions};

/// Request id sent with every call.
pub const RPC_REQUEST_ID: u64 = 1;

/// Outgoing JSON-RPC envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    /// Method name, e.g. `dna_getBalance`.
    pub method: &'a str,
    /// Positional parameters.
    pub params: &'a [Value],
    /// Request id.
    pub id: u64,
    /// Node API key, when the node requires one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'a str>,
}

/// Error object of a JSON-RPC reply.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RpcErrorObject {
    /// Node error code.
    pub code: i64,
    /// Node error message.
    #[serde(default)]
    pub message: String,
}

/// Incoming JSON-RPC envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    /// Protocol marker, `"2.0"` on Idena nodes.
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Echo of the request id.
    #[serde(default)]
    pub id: Option<Value>,
    /// Call result.
    #[serde(default)]
    pub result: Option<Value>,
    /// Call error.
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    /// The `result`, or [`ApiError::Rpc`] when the node reported an error.
    /// A reply with neither yields `Value::Null`.
    pub fn into_result(self) -> Result<Value, ApiError> {
        match self.error {
            Some(e) => Err(ApiError::Rpc {
                code: e.code,
                message: e.message,
            }),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// JSON-RPC client bound to one node URL.
#[derive(Clone)]
pub struct RpcCall {
    client: ApiClient,
    api_key: Option<String>,
}

impl RpcCall {
    /// Client for the node at `node_url`.
    pub fn new(node_url: &str, api_key: Option<String>, options: ClientOptions) -> Result<Self, ApiError> {
        Ok(Self {
            client: ApiClient::new(node_url, options)?,
            api_key,
        })
    }

    /// The normalised node URL.
    pub fn node_url(&self) -> &url::Url {
        self.client.base_url()
    }

    /// Invokes `method` with positional `params` and returns its `result`.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ApiError> {
        let request = RpcRequest {
            method,
            params: &params,
            id: RPC_REQUEST_ID,
            key: self.api_key.as_deref(),
        };
        debug!(method, params = params.len(), "rpc call");

        let body = self.client.post_json(&[], &request).await?;
        let response: RpcResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;

        response.into_result().inspect_err(|e| {
            if let ApiError::Rpc { code, message } = e {
                warn!(method, code, message = %message, "rpc error");
            }
        })
    }
}
