//! Resolve the currency to scan from the extended public key prefix

use tracing::debug;

use super::{Currency, CurrencyKind, Network};
use crate::error::{Error, Result};

/// Determine currency and network for a key.
///
/// Without an explicit symbol (or with BTC, LTC or DOGE) the key prefix decides.
/// Bitcoin Cash shares the `xpub` prefix with Bitcoin and must be requested
/// explicitly. `force_testnet` switches the result to the testnet network.
pub fn resolve_currency(
    key: &str,
    requested: Option<&str>,
    force_testnet: bool,
) -> Result<Currency> {
    let requested_kind = match requested {
        Some(symbol) => Some(
            CurrencyKind::from_symbol(symbol)
                .ok_or_else(|| Error::UnsupportedCurrency(symbol.to_string()))?,
        ),
        None => None,
    };

    let currency = match requested_kind {
        Some(CurrencyKind::BitcoinCash) => Currency::new(CurrencyKind::BitcoinCash, Network::Mainnet),
        _ => from_prefix(key)?,
    };

    debug!("Key resolved to {}", currency);

    if force_testnet {
        Ok(currency.on_testnet())
    } else {
        Ok(currency)
    }
}

fn from_prefix(key: &str) -> Result<Currency> {
    let prefix: String = key.chars().take(4).collect::<String>().to_lowercase();

    match prefix.as_str() {
        "xpub" => Ok(Currency::new(CurrencyKind::Bitcoin, Network::Mainnet)),
        "tpub" => Ok(Currency::new(CurrencyKind::Bitcoin, Network::Testnet)),
        "ltub" => Ok(Currency::new(CurrencyKind::Litecoin, Network::Mainnet)),
        "dgub" => Ok(Currency::new(CurrencyKind::Dogecoin, Network::Mainnet)),
        _ => Err(Error::InvalidKeyPrefix(key.to_string())),
    }
}
