//! Explorer response schema
//!
//! Only the fields the scanner reads are modeled. Unknown fields are ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// `GET {base}/address/{address}`
#[derive(Debug, Clone, Deserialize)]
pub struct AddressDocument {
    pub chain_stats: ChainStats,
}

/// Confirmed on-chain statistics, amounts in base units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChainStats {
    pub tx_count: u64,
    pub funded_txo_sum: u64,
    pub spent_txo_sum: u64,
}

impl AddressDocument {
    /// Parse and validate an address document
    pub fn parse(url: &str, value: Value) -> Result<Self> {
        let document: AddressDocument =
            serde_json::from_value(value).map_err(|e| Error::malformed(url, e))?;

        let stats = &document.chain_stats;
        if stats.spent_txo_sum > stats.funded_txo_sum {
            return Err(Error::malformed(
                url,
                format!(
                    "spent sum {} exceeds funded sum {}",
                    stats.spent_txo_sum, stats.funded_txo_sum
                ),
            ));
        }

        Ok(document)
    }
}

/// `GET {base}/address/{address}/txs`: kept raw
pub fn parse_transactions(url: &str, value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(transactions) => Ok(transactions),
        other => Err(Error::malformed(
            url,
            format!("expected a transaction array, got {}", json_type(&other)),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
