use alloy::primitives::{Address, Bytes, U256, U64};
use serde::Serialize;

use crate::codec::{decode_address, decode_hex_bytes};
use crate::error::ConnectorError;
use crate::ffcapi::TransactionSendRequest;

use super::gas_price::{resolve_gas_price, GasPrice};

/// Transaction object handed to `eth_sendTransaction` for the node to sign.
///
/// Quantities serialize as 0x-prefixed hex; unset fields are omitted so the
/// node fills its own defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTransaction {
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
}

impl NormalizedTransaction {
    fn with_gas_price(mut self, gas_price: Option<GasPrice>) -> Self {
        match gas_price {
            Some(GasPrice::LegacyFlat(price)) | Some(GasPrice::LegacyNested(price)) => {
                self.gas_price = Some(price);
            }
            Some(GasPrice::FeeMarket {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            }) => {
                self.max_fee_per_gas = Some(max_fee_per_gas);
                self.max_priority_fee_per_gas = Some(max_priority_fee_per_gas);
            }
            None => {}
        }
        self
    }
}

/// Which submission path a request takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparedSend {
    /// Already signed elsewhere; sent verbatim with `eth_sendRawTransaction`.
    Raw(Bytes),
    /// Signed by the node via `eth_sendTransaction`.
    Signer(NormalizedTransaction),
}

/// Validate a send request and build what will be submitted.
///
/// Fails on the first malformed field. Every field failure maps to its own
/// `ConnectorError` variant so callers can tell them apart.
pub fn prepare_send(request: &TransactionSendRequest) -> Result<PreparedSend, ConnectorError> {
    if request.pre_signed {
        let raw = decode_hex_bytes(request.transaction_data.as_deref().unwrap_or_default())
            .map_err(ConnectorError::InvalidTransactionData)?;
        return Ok(PreparedSend::Raw(raw));
    }

    let data = request
        .transaction_data
        .as_deref()
        .map(decode_hex_bytes)
        .transpose()
        .map_err(ConnectorError::InvalidTransactionData)?;

    let from_input = request.from.as_deref().unwrap_or_default();
    let from = decode_address(from_input).map_err(|source| ConnectorError::InvalidFromAddress {
        input: from_input.to_string(),
        source,
    })?;

    let to = match request.to.as_deref() {
        Some(to_input) => Some(decode_address(to_input).map_err(|source| {
            ConnectorError::InvalidToAddress {
                input: to_input.to_string(),
                source,
            }
        })?),
        None => None,
    };

    let gas_price =
        resolve_gas_price(request.gas_price.as_ref()).map_err(ConnectorError::InvalidGasPrice)?;

    let tx = NormalizedTransaction {
        from,
        to,
        gas: request.gas.map(U64::from),
        nonce: request.nonce,
        value: request.value,
        data,
        gas_price: None,
        max_fee_per_gas: None,
        max_priority_fee_per_gas: None,
    };
    Ok(PreparedSend::Signer(tx.with_gas_price(gas_price)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticCode;
    use crate::ffcapi::ErrorReason;
    use alloy::primitives::address;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn request(value: serde_json::Value) -> TransactionSendRequest {
        serde_json::from_value(value).unwrap()
    }

    fn signer_tx(value: serde_json::Value) -> NormalizedTransaction {
        match prepare_send(&request(value)).unwrap() {
            PreparedSend::Signer(tx) => tx,
            other => panic!("expected signer transaction, got {other:?}"),
        }
    }

    fn failure_code(value: serde_json::Value) -> DiagnosticCode {
        let err = prepare_send(&request(value)).unwrap_err();
        assert_eq!(err.reason(), Some(ErrorReason::InvalidInputs));
        err.diagnostic_code().unwrap()
    }

    #[test]
    fn test_prepare_full_transaction() {
        let tx = signer_tx(json!({
            "from": "0xb480F96c0a3d6E9e9a263e4665a39bFa6c4d01E8",
            "to": "0xe1a078b9e2b145d0a7387f09277c6ae1d9470771",
            "gas": 1000000,
            "nonce": "111",
            "value": "12345678901234567890123456789",
            "transactionData": "0x60fe47b100000000000000000000000000000000000000000000000000000000feedbeef"
        }));

        assert_eq!(tx.from, address!("0xb480F96c0a3d6E9e9a263e4665a39bFa6c4d01E8"));
        assert_eq!(tx.to, Some(address!("0xe1a078b9e2b145d0a7387f09277c6ae1d9470771")));
        assert_eq!(tx.gas, Some(U64::from(1000000)));
        assert_eq!(tx.nonce, Some(U256::from(111)));
        assert_eq!(
            tx.value,
            Some(U256::from(12345678901234567890123456789u128))
        );
        assert_eq!(
            tx.data.as_ref().map(|d| d.to_string()).as_deref(),
            Some("0x60fe47b100000000000000000000000000000000000000000000000000000000feedbeef")
        );
        assert_eq!(tx.gas_price, None);
        assert_eq!(tx.max_fee_per_gas, None);
    }

    #[test]
    fn test_prepare_contract_creation_has_no_to() {
        let tx = signer_tx(json!({
            "from": "0x3088C3B2361e5b12c5270fA0692d2Fa6b29bdB63",
            "transactionData": "0x6080"
        }));
        assert_eq!(tx.to, None);
        let serialized = serde_json::to_value(&tx).unwrap();
        assert!(serialized.get("to").is_none());
    }

    #[test]
    fn test_prepare_pre_signed_ignores_other_fields() {
        let prepared = prepare_send(&request(json!({
            "from": "not an address",
            "to": "bad to",
            "gasPrice": "not a number",
            "transactionData": "0xd46e8dd67c5d32be8d46e8dd67c5d32be8058bb8eb970870f072445675058bb8eb970870f072445675",
            "preSigned": true
        })))
        .unwrap();

        match prepared {
            PreparedSend::Raw(raw) => assert_eq!(
                raw.to_string(),
                "0xd46e8dd67c5d32be8d46e8dd67c5d32be8058bb8eb970870f072445675058bb8eb970870f072445675"
            ),
            other => panic!("expected raw transaction, got {other:?}"),
        }
    }

    #[test]
    fn test_prepare_field_failures_have_distinct_codes() {
        assert_eq!(
            failure_code(json!({ "transactionData": "not hex" })),
            DiagnosticCode::InvalidTransactionData
        );
        assert_eq!(failure_code(json!({})), DiagnosticCode::InvalidFromAddress);
        assert_eq!(
            failure_code(json!({
                "from": "0x3088C3B2361e5b12c5270fA0692d2Fa6b29bdB63",
                "to": "bad to"
            })),
            DiagnosticCode::InvalidToAddress
        );
        assert_eq!(
            failure_code(json!({
                "from": "0x3088C3B2361e5b12c5270fA0692d2Fa6b29bdB63",
                "gasPrice": "not a number"
            })),
            DiagnosticCode::InvalidGasPrice
        );
        assert_eq!(
            failure_code(json!({ "preSigned": true, "from": "0x1234" })),
            DiagnosticCode::InvalidTransactionData
        );
    }

    #[test]
    fn test_prepare_gas_price_shapes_are_exclusive() {
        let from = "0x3088C3B2361e5b12c5270fA0692d2Fa6b29bdB63";

        let flat = signer_tx(json!({ "from": from, "gasPrice": 65535 }));
        assert_eq!(flat.gas_price, Some(U256::from(65535)));
        assert_eq!(flat.max_fee_per_gas, None);
        assert_eq!(flat.max_priority_fee_per_gas, None);

        let nested = signer_tx(json!({ "from": from, "gasPrice": { "gasPrice": "0xffff" } }));
        assert_eq!(nested.gas_price, Some(U256::from(65535)));
        assert_eq!(nested.max_fee_per_gas, None);
        assert_eq!(nested.max_priority_fee_per_gas, None);

        let fee_market = signer_tx(json!({
            "from": from,
            "gasPrice": { "maxPriorityFeePerGas": 12345, "maxFeePerGas": "0xffff" }
        }));
        assert_eq!(fee_market.gas_price, None);
        assert_eq!(fee_market.max_fee_per_gas, Some(U256::from(65535)));
        assert_eq!(fee_market.max_priority_fee_per_gas, Some(U256::from(12345)));

        let serialized = serde_json::to_value(&fee_market).unwrap();
        assert_eq!(
            serialized,
            json!({
                "from": address!("0x3088C3B2361e5b12c5270fA0692d2Fa6b29bdB63"),
                "maxFeePerGas": "0xffff",
                "maxPriorityFeePerGas": "0x3039"
            })
        );
    }

    #[test]
    fn test_prepare_amounts_beyond_u64_as_json_numbers() {
        let twenty_eth = U256::from(20_000_000_000_000_000_000u128);
        let parsed: TransactionSendRequest = serde_json::from_str(
            r#"{
                "from": "0x3088C3B2361e5b12c5270fA0692d2Fa6b29bdB63",
                "value": 20000000000000000000,
                "gasPrice": { "maxFeePerGas": 20000000000000000000 }
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.value, Some(twenty_eth));

        let tx = match prepare_send(&parsed).unwrap() {
            PreparedSend::Signer(tx) => tx,
            other => panic!("expected signer transaction, got {other:?}"),
        };
        assert_eq!(tx.value, Some(twenty_eth));
        assert_eq!(tx.max_fee_per_gas, Some(twenty_eth));
        assert_eq!(tx.max_priority_fee_per_gas, Some(U256::ZERO));
    }
}
