use alloy::primitives::B256;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::codec::decode_hex_bytes;
use crate::error::ConnectorError;
use crate::ffcapi::{TransactionSendRequest, TransactionSendResponse};

use super::prepare::{prepare_send, PreparedSend};
use super::{EthConnector, ETH_SEND_RAW_TRANSACTION, ETH_SEND_TRANSACTION};

const TRANSACTION_HASH_LENGTH: usize = 32;

impl EthConnector {
    /// Submit a transaction, either pre-signed or for the node to sign.
    ///
    /// Exactly one RPC call is made and nothing is retried here. On failure
    /// the returned error carries the classified reason (if any) alongside
    /// the node's original text.
    #[tracing::instrument(skip_all, fields(request_id = %request.request_id(), pre_signed = request.pre_signed))]
    pub async fn transaction_send(
        &self,
        request: &TransactionSendRequest,
    ) -> Result<TransactionSendResponse, ConnectorError> {
        let prepared = prepare_send(request).inspect_err(|err| {
            debug!(code = ?err.diagnostic_code(), "rejected send request: {err}");
        })?;

        // Raw payloads go out re-encoded as lowercase `0x` hex; the bytes are unchanged.
        let (method, params) = match &prepared {
            PreparedSend::Raw(raw) => (ETH_SEND_RAW_TRANSACTION, json!([raw])),
            PreparedSend::Signer(tx) => (ETH_SEND_TRANSACTION, json!([tx])),
        };
        debug!(method, "submitting transaction");

        let result = self.call_rpc(method, params).await?;
        let transaction_hash = validate_transaction_hash(&result).inspect_err(|err| {
            error!(method, result = %result, "{err}");
        })?;

        info!(method, %transaction_hash, "transaction submitted");
        Ok(TransactionSendResponse { transaction_hash })
    }
}

/// Check that a successful submission returned a 32-byte hash.
///
/// A wrong shape here means the node answered without error but the answer
/// cannot be trusted, so it is reported without a reason.
pub fn validate_transaction_hash(result: &Value) -> Result<B256, ConnectorError> {
    let text = result
        .as_str()
        .ok_or_else(|| ConnectorError::InvalidTransactionHash(result.to_string()))?;
    let bytes = decode_hex_bytes(text)
        .map_err(|_| ConnectorError::InvalidTransactionHash(text.to_string()))?;
    if bytes.len() != TRANSACTION_HASH_LENGTH {
        return Err(ConnectorError::InvalidTransactionHash(text.to_string()));
    }
    Ok(B256::from_slice(&bytes))
}
