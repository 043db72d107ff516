//! Address derivation
//!
//! The scanner only needs one capability from this module: turn
//! (currency, key, mode, account, index) into an address string.
//! Derivation is deterministic and performs no I/O.

pub mod bip32;
pub mod encoding;

use crate::currency::{Currency, DerivationMode};
use crate::error::Result;

pub use bip32::Bip32Deriver;

/// Account branch of the derivation path `m/{account}/{index}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Account {
    /// Receiving addresses (account 0)
    External,
    /// Change addresses (account 1)
    Internal,
}

impl Account {
    /// Branches in scan order
    pub const ALL: [Account; 2] = [Account::External, Account::Internal];

    pub fn index(&self) -> u32 {
        match self {
            Account::External => 0,
            Account::Internal => 1,
        }
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Account::External => write!(f, "external"),
            Account::Internal => write!(f, "internal"),
        }
    }
}

/// Derives address strings from an extended public key
pub trait AddressDeriver: Send + Sync {
    fn derive(
        &self,
        currency: &Currency,
        key: &str,
        mode: DerivationMode,
        account: Account,
        index: u32,
    ) -> Result<String>;
}
