//! Derived address and its on-chain state

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::currency::DerivationMode;
use crate::derive::Account;
use crate::error::{Error, Result};

/// Stats snapshot of an address, amounts in account units
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressStats {
    /// Total number of transactions
    pub tx_count: u64,
    /// Total received
    pub funded: Decimal,
    /// Total sent
    pub spent: Decimal,
}

/// One derived address instance `m/{account}/{index}` under a derivation mode
#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub derivation_mode: DerivationMode,
    pub account: Account,
    pub index: u32,
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    balance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<AddressStats>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    transactions: Vec<Value>,
}

impl Address {
    pub fn new(derivation_mode: DerivationMode, account: Account, index: u32, address: String) -> Self {
        Self {
            derivation_mode,
            account,
            index,
            address,
            balance: None,
            stats: None,
            transactions: Vec::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Balance in account units; zero until resolved
    pub fn balance(&self) -> Decimal {
        self.balance.unwrap_or(Decimal::ZERO)
    }

    pub fn stats(&self) -> Option<&AddressStats> {
        self.stats.as_ref()
    }

    /// Raw explorer transactions, present only for active addresses
    pub fn transactions(&self) -> &[Value] {
        &self.transactions
    }

    pub fn is_resolved(&self) -> bool {
        self.stats.is_some()
    }

    /// Has at least one historical transaction
    pub fn is_active(&self) -> bool {
        self.stats.as_ref().map(|s| s.tx_count > 0).unwrap_or(false)
    }

    /// Holds unspent funds
    pub fn has_balance(&self) -> bool {
        !self.balance().is_zero()
    }

    /// Derivation path relative to the scanned key
    pub fn path(&self) -> String {
        format!("m/{}/{}", self.account.index(), self.index)
    }

    /// Record stats and balance. Allowed once per address.
    pub(crate) fn set_stats(&mut self, stats: AddressStats, balance: Decimal) -> Result<()> {
        if self.is_resolved() {
            return Err(Error::Internal(format!(
                "stats of {} already set",
                self.address
            )));
        }
        self.stats = Some(stats);
        self.balance = Some(balance);
        Ok(())
    }

    pub(crate) fn set_transactions(&mut self, transactions: Vec<Value>) {
        self.transactions = transactions;
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}
