//! Scan report
//!
//! Packages the discovery result with run metadata. Immutable once assembled.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::{sum_balances, DerivationSummary};
use super::orchestrator::Discovery;
use super::{Address, OwnAddressSet};
use crate::currency::Currency;
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct ScanMeta {
    pub key: String,
    pub currency: Currency,
    pub timestamp: DateTime<Utc>,
    pub mode: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanData {
    pub summaries: Vec<DerivationSummary>,
    pub addresses: Vec<Address>,
    pub own_addresses: OwnAddressSet,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub meta: ScanMeta,
    pub data: ScanData,
}

impl ScanReport {
    pub fn assemble(key: &str, currency: Currency, mode: String, discovery: Discovery) -> Self {
        Self {
            meta: ScanMeta {
                key: key.to_string(),
                currency,
                timestamp: Utc::now(),
                mode,
            },
            data: ScanData {
                summaries: discovery.summaries,
                addresses: discovery.addresses,
                own_addresses: discovery.own_addresses,
            },
        }
    }

    /// Balance over every scanned derivation mode
    pub fn total_balance(&self) -> Decimal {
        sum_balances(self.data.summaries.iter().map(|summary| summary.balance))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Human-readable description of what was scanned
pub fn mode_label(balance_only: bool, derivation_filter: Option<&str>) -> String {
    let mut label = String::from("Full scan");
    if balance_only {
        label.push_str(" | Balance Only");
    }
    if let Some(filter) = derivation_filter {
        label.push_str(" | Derivation mode: ");
        label.push_str(filter);
    }
    label
}
