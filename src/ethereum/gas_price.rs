use alloy::primitives::U256;
use serde_json::{Map, Value};

use crate::codec::parse_quantity;
use crate::error::GasPriceError;

const GAS_PRICE: &str = "gasPrice";
const MAX_FEE_PER_GAS: &str = "maxFeePerGas";
const MAX_PRIORITY_FEE_PER_GAS: &str = "maxPriorityFeePerGas";

/// The pricing model a request asked for. Exactly one is ever active, so a
/// transaction cannot carry legacy and fee-market fields together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasPrice {
    /// `"gasPrice": 123` or `"gasPrice": "0x7b"`
    LegacyFlat(U256),
    /// `"gasPrice": { "gasPrice": ... }`
    LegacyNested(U256),
    /// `"gasPrice": { "maxFeePerGas": ..., "maxPriorityFeePerGas": ... }`
    FeeMarket {
        max_fee_per_gas: U256,
        max_priority_fee_per_gas: U256,
    },
}

/// Resolve the polymorphic `gasPrice` request field.
///
/// An absent or null value resolves to `None`, leaving pricing to the node.
pub fn resolve_gas_price(raw: Option<&Value>) -> Result<Option<GasPrice>, GasPriceError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(fields)) => resolve_object(fields).map(Some),
        Some(scalar) => Ok(Some(GasPrice::LegacyFlat(parse_quantity(scalar)?))),
    }
}

fn resolve_object(fields: &Map<String, Value>) -> Result<GasPrice, GasPriceError> {
    if let Some(max_fee) = present(fields, MAX_FEE_PER_GAS) {
        let max_priority_fee_per_gas = match present(fields, MAX_PRIORITY_FEE_PER_GAS) {
            Some(priority) => field_quantity(MAX_PRIORITY_FEE_PER_GAS, priority)?,
            None => U256::ZERO,
        };
        return Ok(GasPrice::FeeMarket {
            max_fee_per_gas: field_quantity(MAX_FEE_PER_GAS, max_fee)?,
            max_priority_fee_per_gas,
        });
    }

    if let Some(price) = present(fields, GAS_PRICE) {
        return Ok(GasPrice::LegacyNested(field_quantity(GAS_PRICE, price)?));
    }

    let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
    Err(GasPriceError::UnknownShape(keys.join(", ")))
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn field_quantity(field: &'static str, value: &Value) -> Result<U256, GasPriceError> {
    parse_quantity(value).map_err(|source| GasPriceError::Field { field, source })
}
