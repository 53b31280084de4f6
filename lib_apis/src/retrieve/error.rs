//! # API Error Model
//!
//! Every client operation in this crate resolves to either the decoded JSON
//! body or an [`ApiError`]. Transport failures, non-2xx replies, undecodable
//! bodies and JSON-RPC error objects all land in the same enum so callers
//! only ever match on one type.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Uniform error returned by every request issued through this crate.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL or a joined path could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A path segment was empty, `.` or `..`.
    #[error("invalid path segment: {0:?}")]
    InvalidPath(String),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(String),

    /// Connection, timeout or middleware failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status code.
    #[error("HTTP {status}: {message}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Message extracted from the body, or the canonical reason phrase.
        message: String,
        /// The body, when it was valid JSON.
        body: Option<Value>,
    },

    /// The body of a successful response was not the expected JSON.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// The JSON-RPC endpoint returned an `error` object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// Error code reported by the node.
        code: i64,
        /// Error message reported by the node.
        message: String,
    },

    /// The request body could not be serialised.
    #[error("failed to encode request body: {0}")]
    Encode(String),
}

/// Serialisable `{message, code}` view of an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Human readable description of the failure.
    pub message: String,
    /// HTTP status or RPC code, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl ApiError {
    /// The HTTP status or RPC error code carried by this error, if any.
    pub fn code(&self) -> Option<i64> {
        match self {
            ApiError::Status { status, .. } => Some(i64::from(*status)),
            ApiError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the `{message, code}` record for this error.
    pub fn to_record(&self) -> ErrorRecord {
        let message = match self {
            ApiError::Status { message, .. } | ApiError::Rpc { message, .. } => message.clone(),
            other => other.to_string(),
        };
        ErrorRecord {
            message,
            code: self.code(),
        }
    }

    /// Builds a [`ApiError::Status`] from a non-2xx status and its raw body.
    ///
    /// When the body is JSON the message is taken from the first of `error`
    /// (string or `{message}` object), `status.error_message` or `message`.
    /// Otherwise the trimmed body text is used, falling back to the
    /// canonical reason phrase for an empty body.
    pub fn from_status(status: u16, raw_body: Option<&str>) -> Self {
        let text = raw_body.map(str::trim).filter(|b| !b.is_empty());
        let body: Option<Value> = text.and_then(|b| serde_json::from_str(b).ok());

        let message = body
            .as_ref()
            .and_then(message_from_json)
            .or_else(|| text.map(str::to_string))
            .unwrap_or_else(|| {
                StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("request failed")
                    .to_string()
            });

        ApiError::Status {
            status,
            message,
            body,
        }
    }
}

fn message_from_json(body: &Value) -> Option<String> {
    let candidates = [
        &body["error"],
        &body["error"]["message"],
        &body["status"]["error_message"],
        &body["message"],
    ];
    candidates
        .iter()
        .find_map(|v| v.as_str().map(str::to_string))
}

impl From<reqwest_middleware::Error> for ApiError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => ApiError::Transport(format!("{e:#}")),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::Client(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
