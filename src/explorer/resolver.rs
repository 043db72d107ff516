//! Stats resolver
//!
//! Turns one derived address into populated stats and balance:
//! fetch the stats document, convert base units to account units with
//! exact decimal arithmetic, and fetch the transaction list of active
//! addresses.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

use super::endpoints::ExplorerEndpoints;
use super::schema::{parse_transactions, AddressDocument};
use crate::currency::Currency;
use crate::error::{Error, Result};
use crate::fetch::JsonFetcher;
use crate::scan::{Address, AddressStats};

pub struct StatsResolver {
    fetcher: Arc<dyn JsonFetcher>,
    endpoints: ExplorerEndpoints,
    /// Skip transaction lists
    balance_only: bool,
}

impl StatsResolver {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, endpoints: ExplorerEndpoints, balance_only: bool) -> Self {
        Self {
            fetcher,
            endpoints,
            balance_only,
        }
    }

    pub fn endpoints(&self) -> &ExplorerEndpoints {
        &self.endpoints
    }

    /// Populate stats, balance and (for active addresses) transactions
    pub async fn resolve(&self, currency: &Currency, address: &mut Address) -> Result<()> {
        let url = self.endpoints.address_url(currency, address.as_str())?;

        let document = AddressDocument::parse(&url, self.fetcher.get_json(&url).await?)?;
        let chain = document.chain_stats;

        let funded = i128::from(chain.funded_txo_sum);
        let spent = i128::from(chain.spent_txo_sum);

        let stats = AddressStats {
            tx_count: chain.tx_count,
            funded: to_account_unit(funded, currency)?,
            spent: to_account_unit(spent, currency)?,
        };
        let balance = to_account_unit(funded - spent, currency)?;

        debug!(
            "{} {}: {} txs, balance {}",
            address.path(),
            address,
            stats.tx_count,
            balance
        );

        address.set_stats(stats, balance)?;

        if chain.tx_count > 0 && !self.balance_only {
            let txs_url = self.endpoints.transactions_url(currency, address.as_str())?;
            let transactions = parse_transactions(&txs_url, self.fetcher.get_json(&txs_url).await?)?;
            address.set_transactions(transactions);
        }

        Ok(())
    }
}

/// Convert from base unit to unit of account (e.g. satoshis to bitcoins)
///
/// Exact fixed-point division by the currency precision; trailing
/// fractional zeros are dropped, so zero renders as `0`.
pub fn to_account_unit(amount: i128, currency: &Currency) -> Result<Decimal> {
    if amount == 0 {
        return Ok(Decimal::ZERO);
    }

    let amount = Decimal::try_from_i128_with_scale(amount, 0)
        .map_err(|e| Error::Internal(format!("amount {} out of range: {}", amount, e)))?;

    amount
        .checked_div(Decimal::from(currency.precision()))
        .map(|value| value.normalize())
        .ok_or_else(|| Error::Internal(format!("cannot convert {} to account unit", amount)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{CurrencyKind, DerivationMode, Network};
    use crate::derive::Account;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned documents by URL and records requests
    struct CannedFetcher {
        documents: HashMap<String, Value>,
        requests: Mutex<Vec<String>>,
    }

    impl CannedFetcher {
        fn new(documents: Vec<(&str, Value)>) -> Self {
            Self {
                documents: documents
                    .into_iter()
                    .map(|(url, doc)| (url.to_string(), doc))
                    .collect(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JsonFetcher for CannedFetcher {
        async fn get_json(&self, url: &str) -> Result<Value> {
            self.requests.lock().unwrap().push(url.to_string());
            self.documents
                .get(url)
                .cloned()
                .ok_or_else(|| Error::fetch(url, "Status Code: 404 Not Found"))
        }
    }

    fn bitcoin() -> Currency {
        Currency::new(CurrencyKind::Bitcoin, Network::Mainnet)
    }

    fn stats_doc(tx_count: u64, funded: u64, spent: u64) -> Value {
        json!({
            "chain_stats": {
                "tx_count": tx_count,
                "funded_txo_sum": funded,
                "spent_txo_sum": spent
            }
        })
    }

    const STATS_URL: &str = "https://blockstream.info/api/address/1abc";
    const TXS_URL: &str = "https://blockstream.info/api/address/1abc/txs";

    fn address() -> Address {
        Address::new(DerivationMode::Legacy, Account::External, 0, "1abc".into())
    }

    #[test]
    fn test_decimal_exactness() {
        let btc = bitcoin();
        assert_eq!(to_account_unit(150_000_000, &btc).unwrap().to_string(), "1.5");
        assert_eq!(to_account_unit(0, &btc).unwrap().to_string(), "0");
        assert_eq!(to_account_unit(1, &btc).unwrap().to_string(), "0.00000001");
        assert_eq!(to_account_unit(100_000_000, &btc).unwrap().to_string(), "1");
        assert_eq!(
            to_account_unit(2_100_000_000_000_000, &btc).unwrap().to_string(),
            "21000000"
        );
    }

    #[tokio::test]
    async fn test_active_address_fetches_transactions() {
        let fetcher = Arc::new(CannedFetcher::new(vec![
            (STATS_URL, stats_doc(2, 150_000_000, 50_000_000)),
            (TXS_URL, json!([{"txid": "aa"}, {"txid": "bb"}])),
        ]));
        let resolver = StatsResolver::new(fetcher.clone(), ExplorerEndpoints::default(), false);

        let mut address = address();
        resolver.resolve(&bitcoin(), &mut address).await.unwrap();

        let stats = address.stats().unwrap();
        assert_eq!(stats.tx_count, 2);
        assert_eq!(stats.funded.to_string(), "1.5");
        assert_eq!(stats.spent.to_string(), "0.5");
        assert_eq!(address.balance().to_string(), "1");
        assert_eq!(address.transactions().len(), 2);
        assert_eq!(fetcher.requests(), vec![STATS_URL, TXS_URL]);
    }

    #[tokio::test]
    async fn test_inactive_address_skips_transactions() {
        let fetcher = Arc::new(CannedFetcher::new(vec![(STATS_URL, stats_doc(0, 0, 0))]));
        let resolver = StatsResolver::new(fetcher.clone(), ExplorerEndpoints::default(), false);

        let mut address = address();
        resolver.resolve(&bitcoin(), &mut address).await.unwrap();

        assert!(!address.is_active());
        assert_eq!(address.balance().to_string(), "0");
        assert!(address.transactions().is_empty());
        assert_eq!(fetcher.requests(), vec![STATS_URL]);
    }

    #[tokio::test]
    async fn test_balance_only_skips_transactions() {
        let fetcher = Arc::new(CannedFetcher::new(vec![(
            STATS_URL,
            stats_doc(4, 150_000_000, 0),
        )]));
        let resolver = StatsResolver::new(fetcher.clone(), ExplorerEndpoints::default(), true);

        let mut address = address();
        resolver.resolve(&bitcoin(), &mut address).await.unwrap();

        assert!(address.is_active());
        assert_eq!(address.balance().to_string(), "1.5");
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_currency_before_network() {
        let fetcher = Arc::new(CannedFetcher::new(vec![]));
        let resolver = StatsResolver::new(fetcher.clone(), ExplorerEndpoints::default(), false);
        let doge = Currency::new(CurrencyKind::Dogecoin, Network::Mainnet);

        let mut address = Address::new(DerivationMode::Dogecoin, Account::External, 0, "D8x".into());
        let err = resolver.resolve(&doge, &mut address).await.unwrap_err();

        assert!(matches!(err, Error::UnsupportedCurrency(_)));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_document() {
        let fetcher = Arc::new(CannedFetcher::new(vec![(STATS_URL, json!({"error": "oops"}))]));
        let resolver = StatsResolver::new(fetcher, ExplorerEndpoints::default(), false);

        let mut address = address();
        let err = resolver.resolve(&bitcoin(), &mut address).await.unwrap_err();

        assert!(matches!(err, Error::MalformedResponse { .. }));
        assert!(!address.is_resolved());
    }
}
