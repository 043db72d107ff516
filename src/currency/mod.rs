//! Currency registry
//!
//! Static per-currency parameters consumed read-only by the scanner:
//! - Precision divisor (base unit → account unit)
//! - Network selection (mainnet / testnet)
//! - Ordered list of supported derivation modes
//! - Address encoding parameters used by the deriver

pub mod registry;
pub mod resolve;

use serde::Serialize;
use std::fmt;

pub use registry::AddressParams;
pub use resolve::resolve_currency;

/// Supported currency families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyKind {
    Bitcoin,
    BitcoinCash,
    Litecoin,
    Dogecoin,
}

impl CurrencyKind {
    pub fn name(&self) -> &'static str {
        match self {
            CurrencyKind::Bitcoin => "Bitcoin",
            CurrencyKind::BitcoinCash => "Bitcoin Cash",
            CurrencyKind::Litecoin => "Litecoin",
            CurrencyKind::Dogecoin => "Dogecoin",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyKind::Bitcoin => "BTC",
            CurrencyKind::BitcoinCash => "BCH",
            CurrencyKind::Litecoin => "LTC",
            CurrencyKind::Dogecoin => "DOGE",
        }
    }

    /// Look up a currency by its ticker symbol (case-insensitive)
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.to_ascii_uppercase().as_str() {
            "BTC" => Some(CurrencyKind::Bitcoin),
            "BCH" => Some(CurrencyKind::BitcoinCash),
            "LTC" => Some(CurrencyKind::Litecoin),
            "DOGE" => Some(CurrencyKind::Dogecoin),
            _ => None,
        }
    }
}

/// Network selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn is_testnet(&self) -> bool {
        *self == Network::Testnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// Address encoding scheme applied to the key tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DerivationMode {
    #[serde(rename = "Legacy")]
    Legacy,
    #[serde(rename = "SegWit")]
    SegWit,
    #[serde(rename = "Native SegWit")]
    NativeSegWit,
    #[serde(rename = "Bitcoin Cash")]
    BitcoinCash,
    #[serde(rename = "Dogecoin")]
    Dogecoin,
}

impl DerivationMode {
    pub fn label(&self) -> &'static str {
        match self {
            DerivationMode::Legacy => "Legacy",
            DerivationMode::SegWit => "SegWit",
            DerivationMode::NativeSegWit => "Native SegWit",
            DerivationMode::BitcoinCash => "Bitcoin Cash",
            DerivationMode::Dogecoin => "Dogecoin",
        }
    }

    /// Case-insensitive prefix match against the mode label
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.label()
            .to_lowercase()
            .starts_with(&prefix.to_lowercase())
    }
}

impl fmt::Display for DerivationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved currency: family plus network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub kind: CurrencyKind,
    pub network: Network,
}

impl Currency {
    pub fn new(kind: CurrencyKind, network: Network) -> Self {
        Self { kind, network }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn symbol(&self) -> &'static str {
        self.kind.symbol()
    }

    /// Base units per account unit (e.g. satoshis per bitcoin)
    pub fn precision(&self) -> u64 {
        registry::precision(self.kind)
    }

    /// Derivation modes in their declared scan order
    pub fn derivation_modes(&self) -> &'static [DerivationMode] {
        registry::derivation_modes(self.kind)
    }

    pub fn address_params(&self) -> AddressParams {
        registry::address_params(self.kind, self.network)
    }

    /// Same currency on the testnet network
    pub fn on_testnet(self) -> Self {
        Self {
            network: Network::Testnet,
            ..self
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.network)
    }
}
