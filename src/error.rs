use std::time::Duration;

use crate::codec::{HexError, QuantityError};
use crate::ffcapi::{ErrorReason, ErrorResponse};

/// Stable identifiers for failures detected inside the connector, one per
/// field or response check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    InvalidGasPrice,
    InvalidTransactionData,
    InvalidFromAddress,
    InvalidToAddress,
    InvalidTransactionHash,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::InvalidGasPrice => "FF23015",
            DiagnosticCode::InvalidTransactionData => "FF23018",
            DiagnosticCode::InvalidFromAddress => "FF23019",
            DiagnosticCode::InvalidToAddress => "FF23020",
            DiagnosticCode::InvalidTransactionHash => "FF23048",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GasPriceError {
    #[error(transparent)]
    Quantity(#[from] QuantityError),
    #[error("unrecognised object shape (keys: {0})")]
    UnknownShape(String),
    #[error("invalid field '{field}': {source}")]
    Field {
        field: &'static str,
        source: QuantityError,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum ConnectorError {
    #[error("FF23018: Invalid transaction data: {0}")]
    InvalidTransactionData(HexError),
    #[error("FF23019: Invalid 'from' address '{input}': {source}")]
    InvalidFromAddress { input: String, source: HexError },
    #[error("FF23020: Invalid 'to' address '{input}': {source}")]
    InvalidToAddress { input: String, source: HexError },
    #[error("FF23015: Invalid gas price: {0}")]
    InvalidGasPrice(GasPriceError),
    #[error("FF23048: Invalid transaction hash returned by node ({0})")]
    InvalidTransactionHash(String),
    #[error("{message}")]
    Rpc {
        method: &'static str,
        reason: Option<ErrorReason>,
        message: String,
    },
    #[error("{method} did not complete within {timeout:?}")]
    RpcTimeout {
        method: &'static str,
        timeout: Duration,
    },
}

impl ConnectorError {
    /// Coarse reason used for automated retry decisions.
    pub fn reason(&self) -> Option<ErrorReason> {
        match self {
            ConnectorError::InvalidTransactionData(_)
            | ConnectorError::InvalidFromAddress { .. }
            | ConnectorError::InvalidToAddress { .. }
            | ConnectorError::InvalidGasPrice(_) => Some(ErrorReason::InvalidInputs),
            ConnectorError::Rpc { reason, .. } => *reason,
            ConnectorError::InvalidTransactionHash(_) | ConnectorError::RpcTimeout { .. } => None,
        }
    }

    /// Fine-grained identifier for failures detected locally.
    pub fn diagnostic_code(&self) -> Option<DiagnosticCode> {
        match self {
            ConnectorError::InvalidTransactionData(_) => Some(DiagnosticCode::InvalidTransactionData),
            ConnectorError::InvalidFromAddress { .. } => Some(DiagnosticCode::InvalidFromAddress),
            ConnectorError::InvalidToAddress { .. } => Some(DiagnosticCode::InvalidToAddress),
            ConnectorError::InvalidGasPrice(_) => Some(DiagnosticCode::InvalidGasPrice),
            ConnectorError::InvalidTransactionHash(_) => Some(DiagnosticCode::InvalidTransactionHash),
            ConnectorError::Rpc { .. } | ConnectorError::RpcTimeout { .. } => None,
        }
    }

    /// Node method whose call failed, for failures that reached the node.
    pub fn method(&self) -> Option<&'static str> {
        match self {
            ConnectorError::Rpc { method, .. } | ConnectorError::RpcTimeout { method, .. } => {
                Some(*method)
            }
            _ => None,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            reason: self
                .reason()
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
            error: self.to_string(),
            code: self.diagnostic_code().map(|c| c.as_str()),
        }
    }
}
