//! Explorer endpoint templates per currency

use std::collections::HashMap;

use crate::config::ExplorerConfig;
use crate::currency::{Currency, CurrencyKind};
use crate::error::{Error, Result};

/// Esplora-compatible explorers bundled by default
const BUILTIN_ENDPOINTS: &[(CurrencyKind, &str)] = &[
    (
        CurrencyKind::Bitcoin,
        "https://blockstream.info/{network}api/address/{address}",
    ),
    (
        CurrencyKind::Litecoin,
        "https://litecoinspace.org/{network}api/address/{address}",
    ),
];

/// Endpoint table: built-in templates plus configured overrides
#[derive(Debug, Clone)]
pub struct ExplorerEndpoints {
    templates: HashMap<CurrencyKind, String>,
}

impl Default for ExplorerEndpoints {
    fn default() -> Self {
        Self {
            templates: BUILTIN_ENDPOINTS
                .iter()
                .map(|(kind, template)| (*kind, template.to_string()))
                .collect(),
        }
    }
}

impl ExplorerEndpoints {
    /// Built-in endpoints overridden by `explorer.endpoints` entries
    pub fn from_config(config: &ExplorerConfig) -> Result<Self> {
        let mut endpoints = Self::default();

        for (symbol, template) in &config.endpoints {
            let kind = CurrencyKind::from_symbol(symbol)
                .ok_or_else(|| Error::Config(format!("Unknown currency in explorer.endpoints: {}", symbol)))?;
            endpoints.templates.insert(kind, template.clone());
        }

        Ok(endpoints)
    }

    /// Whether a stats endpoint exists for the currency
    pub fn supports(&self, currency: &Currency) -> bool {
        self.templates.contains_key(&currency.kind)
    }

    /// Stats URL for one address
    pub fn address_url(&self, currency: &Currency, address: &str) -> Result<String> {
        let template = self
            .templates
            .get(&currency.kind)
            .ok_or_else(|| Error::UnsupportedCurrency(currency.symbol().to_string()))?;

        let network = if currency.network.is_testnet() {
            "testnet/"
        } else {
            ""
        };

        Ok(template
            .replace("{network}", network)
            .replace("{address}", address))
    }

    /// Transaction-list URL for one address
    pub fn transactions_url(&self, currency: &Currency, address: &str) -> Result<String> {
        Ok(format!("{}/txs", self.address_url(currency, address)?))
    }
}
