//! The JSON-RPC node seen from the connector.
//!
//! Everything network-related (connection pooling, TLS, transport retries)
//! lives behind [`RpcBackend`]; the connector only issues single calls.

use alloy::{
    rpc::client::{ClientBuilder, RpcClient},
    transports::{RpcError, TransportError},
};
use async_trait::async_trait;
use serde_json::Value;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Error object returned by the node.
    #[error("{message}")]
    Node { code: i64, message: String },
    /// The call never produced a JSON-RPC response.
    #[error("{0}")]
    Transport(String),
}

impl BackendError {
    pub fn message(&self) -> &str {
        match self {
            BackendError::Node { message, .. } => message,
            BackendError::Transport(message) => message,
        }
    }

    /// JSON-RPC error code, when the node answered with an error object.
    pub fn code(&self) -> Option<i64> {
        match self {
            BackendError::Node { code, .. } => Some(*code),
            BackendError::Transport(_) => None,
        }
    }
}

impl From<TransportError> for BackendError {
    fn from(err: TransportError) -> Self {
        match err {
            RpcError::ErrorResp(payload) => BackendError::Node {
                code: payload.code,
                message: payload.message.to_string(),
            },
            other => BackendError::Transport(other.to_string()),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RpcBackend: Send + Sync {
    /// Issue exactly one JSON-RPC call and return the raw `result` member.
    async fn call_rpc(&self, method: &'static str, params: Value) -> Result<Value, BackendError>;
}

/// HTTP backend built on alloy's RPC client.
pub struct AlloyBackend {
    client: RpcClient,
}

impl AlloyBackend {
    pub fn new(rpc_url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let url = rpc_url.parse()?;
        let client = ClientBuilder::default().http(url);
        Ok(Self { client })
    }
}

#[async_trait]
impl RpcBackend for AlloyBackend {
    async fn call_rpc(&self, method: &'static str, params: Value) -> Result<Value, BackendError> {
        self.client
            .request::<Value, Value>(method, params)
            .await
            .map_err(BackendError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::rpc::json_rpc::ErrorPayload;
    use std::borrow::Cow;

    #[test]
    fn test_node_error_keeps_code_and_message() {
        let payload = ErrorPayload {
            code: -32000,
            message: Cow::Borrowed("nonce too low"),
            data: None,
        };
        let err = BackendError::from(TransportError::ErrorResp(payload));
        assert_eq!(
            err,
            BackendError::Node {
                code: -32000,
                message: "nonce too low".to_string()
            }
        );
        assert_eq!(err.message(), "nonce too low");
        assert_eq!(err.code(), Some(-32000));
    }

    #[test]
    fn test_non_response_errors_become_transport_errors() {
        let err = BackendError::from(TransportError::NullResp);
        assert!(matches!(err, BackendError::Transport(_)));
    }

    #[test]
    fn test_alloy_backend_rejects_bad_url() {
        assert!(AlloyBackend::new("not a url").is_err());
        assert!(AlloyBackend::new("http://127.0.0.1:8545").is_ok());
    }
}
