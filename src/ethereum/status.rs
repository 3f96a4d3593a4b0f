use serde_json::json;

use crate::error::ConnectorError;
use crate::ffcapi::{LiveResponse, ReadyResponse};

use super::{EthConnector, NET_VERSION};

impl EthConnector {
    pub fn is_live(&self) -> LiveResponse {
        LiveResponse { up: true }
    }

    /// Ready once the node answers `net_version`; the chain id is reported
    /// as downstream detail.
    pub async fn is_ready(&self) -> Result<ReadyResponse, ConnectorError> {
        let chain_id = self.call_rpc(NET_VERSION, json!([])).await?;
        Ok(ReadyResponse {
            ready: true,
            downstream_details: Some(json!({ "chainID": chain_id })),
        })
    }
}
