use std::{sync::Arc, time::Duration};

use serde_json::Value;
use tracing::{error, warn};

use crate::backend::RpcBackend;
use crate::error::ConnectorError;

pub mod error_mapping;
pub mod gas_price;
pub mod prepare;
pub mod send_transaction;
pub mod status;

pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";
pub const ETH_SEND_RAW_TRANSACTION: &str = "eth_sendRawTransaction";
pub const ETH_CALL: &str = "eth_call";
pub const ETH_ESTIMATE_GAS: &str = "eth_estimateGas";
pub const NET_VERSION: &str = "net_version";

/// Stateless translation layer between FFCAPI requests and an Ethereum node.
///
/// Holds no per-request state, so one instance is shared by every request.
pub struct EthConnector {
    backend: Arc<dyn RpcBackend>,
    rpc_timeout: Duration,
}

impl EthConnector {
    pub fn new(backend: Arc<dyn RpcBackend>, rpc_timeout: Duration) -> Self {
        Self {
            backend,
            rpc_timeout,
        }
    }

    /// Single outbound call, bounded by the configured deadline.
    ///
    /// Node failures are classified against the keyword table of `method`;
    /// a timeout carries no reason since there is no node text to classify.
    async fn call_rpc(&self, method: &'static str, params: Value) -> Result<Value, ConnectorError> {
        let call = self.backend.call_rpc(method, params);
        match tokio::time::timeout(self.rpc_timeout, call).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(err)) => {
                let reason = error_mapping::map_error(method, err.message());
                warn!(method, code = ?err.code(), reason = ?reason, error = %err, "RPC call failed");
                Err(ConnectorError::Rpc {
                    method,
                    reason,
                    message: err.to_string(),
                })
            }
            Err(_) => {
                error!(method, timeout = ?self.rpc_timeout, "RPC call timed out");
                Err(ConnectorError::RpcTimeout {
                    method,
                    timeout: self.rpc_timeout,
                })
            }
        }
    }
}
