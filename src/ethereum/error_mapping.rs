use crate::ffcapi::ErrorReason;

use super::{ETH_CALL, ETH_ESTIMATE_GAS, ETH_SEND_RAW_TRANSACTION, ETH_SEND_TRANSACTION};

/// Ordered (substring, reason) pairs; the first match wins.
pub type KeywordTable = &'static [(&'static str, ErrorReason)];

// Node wording varies between clients, so matching is on lowercase
// substrings rather than exact messages. An unrelated message that happens
// to contain one of these phrases is classified too.
static SEND_KEYWORDS: KeywordTable = &[
    ("nonce too low", ErrorReason::NonceTooLow),
    ("insufficient funds", ErrorReason::InsufficientFunds),
    ("transaction underpriced", ErrorReason::TransactionUnderpriced),
    ("known transaction", ErrorReason::KnownTransaction),
    ("already known", ErrorReason::KnownTransaction),
];

static CALL_KEYWORDS: KeywordTable = &[("execution reverted", ErrorReason::TransactionReverted)];

static NO_KEYWORDS: KeywordTable = &[];

pub fn keyword_table(method: &str) -> KeywordTable {
    match method {
        ETH_SEND_TRANSACTION | ETH_SEND_RAW_TRANSACTION => SEND_KEYWORDS,
        ETH_CALL | ETH_ESTIMATE_GAS => CALL_KEYWORDS,
        _ => NO_KEYWORDS,
    }
}

pub fn classify(table: KeywordTable, message: &str) -> Option<ErrorReason> {
    let message = message.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| message.contains(keyword))
        .map(|(_, reason)| *reason)
}

/// Classify the error text reported by `method`.
pub fn map_error(method: &str, message: &str) -> Option<ErrorReason> {
    classify(keyword_table(method), message)
}
