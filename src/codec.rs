use alloy::primitives::{Address, Bytes, U256};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

pub const ADDRESS_LENGTH: usize = 20;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HexError {
    #[error("missing 0x prefix")]
    MissingPrefix,
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("'{0}' is not a decimal or 0x-prefixed hex integer")]
    Unparseable(String),
    #[error("'{0}' does not fit in 256 bits")]
    Overflow(String),
    #[error("expected an integer or string, found {0}")]
    UnexpectedType(String),
}

fn strip_hex_prefix(input: &str) -> Option<&str> {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
}

/// Decode a 0x-prefixed hex string of any length.
pub fn decode_hex_bytes(input: &str) -> Result<Bytes, HexError> {
    let digits = strip_hex_prefix(input.trim()).ok_or(HexError::MissingPrefix)?;
    Ok(Bytes::from(hex::decode(digits)?))
}

/// Decode a 0x-prefixed hex string that must hold exactly 20 bytes.
///
/// Mixed-case input is accepted without verifying an EIP-55 checksum.
pub fn decode_address(input: &str) -> Result<Address, HexError> {
    let bytes = decode_hex_bytes(input)?;
    if bytes.len() != ADDRESS_LENGTH {
        return Err(HexError::InvalidLength {
            expected: ADDRESS_LENGTH,
            actual: bytes.len(),
        });
    }
    Ok(Address::from_slice(&bytes))
}

/// Parse an unsigned integer from a JSON number, a decimal string or a
/// 0x-prefixed hex string.
///
/// Numbers keep their literal text (`arbitrary_precision`), so amounts past
/// `u64::MAX` are accepted up to 256 bits.
pub fn parse_quantity(value: &Value) -> Result<U256, QuantityError> {
    match value {
        Value::Number(n) => parse_quantity_str(&n.to_string()),
        Value::String(s) => parse_quantity_str(s),
        other => Err(QuantityError::UnexpectedType(json_type_name(other).to_string())),
    }
}

pub fn parse_quantity_str(input: &str) -> Result<U256, QuantityError> {
    let trimmed = input.trim();
    let (digits, radix) = match strip_hex_prefix(trimmed) {
        Some(hex_digits) => (hex_digits, 16),
        None => (trimmed, 10),
    };

    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| match radix {
            16 => c.is_ascii_hexdigit(),
            _ => c.is_ascii_digit(),
        });
    if !well_formed {
        return Err(QuantityError::Unparseable(input.to_string()));
    }

    U256::from_str_radix(digits, radix).map_err(|_| QuantityError::Overflow(input.to_string()))
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_quantity(&value).map(Some).map_err(de::Error::custom),
    }
}

pub fn deserialize_gas<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match deserialize_quantity(deserializer)? {
        None => Ok(None),
        Some(gas) => u64::try_from(gas)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("gas limit {gas} does not fit in 64 bits"))),
    }
}
