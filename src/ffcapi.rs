use alloy::primitives::{B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::codec::{deserialize_gas, deserialize_quantity};

/// Closed set of failure reasons that upstream retry logic can act on.
///
/// The absence of a reason (`Option::None`) is the "unknown" case: the call
/// failed but nothing in the failure was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    InvalidInputs,
    NonceTooLow,
    InsufficientFunds,
    TransactionUnderpriced,
    KnownTransaction,
    TransactionReverted,
}

impl ErrorReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorReason::InvalidInputs => "invalid_inputs",
            ErrorReason::NonceTooLow => "nonce_too_low",
            ErrorReason::InsufficientFunds => "insufficient_funds",
            ErrorReason::TransactionUnderpriced => "transaction_underpriced",
            ErrorReason::KnownTransaction => "known_transaction",
            ErrorReason::TransactionReverted => "transaction_reverted",
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Envelope header carried by every request from the transaction manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestHeader {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub request_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSendRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffcapi: Option<RequestHeader>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "deserialize_gas")]
    pub gas: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub nonce: Option<U256>,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub value: Option<U256>,
    #[serde(default)]
    pub transaction_data: Option<String>,
    // Number, string or object; resolved by `ethereum::gas_price`.
    #[serde(default)]
    pub gas_price: Option<Value>,
    #[serde(default)]
    pub pre_signed: bool,
}

impl TransactionSendRequest {
    pub fn request_id(&self) -> &str {
        self.ffcapi.as_ref().map(|h| h.id.as_str()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSendResponse {
    pub transaction_hash: B256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveResponse {
    pub up: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downstream_details: Option<Value>,
}

/// Failure body returned to the caller: coarse reason, free text, and the
/// diagnostic code when the failure was detected locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub reason: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}
