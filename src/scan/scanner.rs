//! Scan entry point
//!
//! Resolves the currency of a key, checks that an explorer endpoint exists
//! before any network call, runs the orchestrator and assembles the report.

use std::sync::Arc;
use tracing::info;

use super::orchestrator::Orchestrator;
use super::report::{mode_label, ScanReport};
use super::walker::Walker;
use crate::config::{Config, ScanConfig};
use crate::currency::resolve_currency;
use crate::derive::{AddressDeriver, Bip32Deriver};
use crate::error::{Error, Result};
use crate::explorer::{ExplorerEndpoints, StatsResolver};
use crate::fetch::{HttpFetcher, JsonFetcher};

pub struct Scanner {
    deriver: Arc<dyn AddressDeriver>,
    resolver: StatsResolver,
    settings: ScanConfig,
}

impl Scanner {
    pub fn new(
        deriver: Arc<dyn AddressDeriver>,
        fetcher: Arc<dyn JsonFetcher>,
        endpoints: ExplorerEndpoints,
        settings: ScanConfig,
    ) -> Self {
        let resolver = StatsResolver::new(fetcher, endpoints, settings.balance_only);
        Self {
            deriver,
            resolver,
            settings,
        }
    }

    /// BIP32 derivation over HTTP explorers
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        let endpoints = ExplorerEndpoints::from_config(&config.explorer)?;

        Ok(Self::new(
            Arc::new(Bip32Deriver::new()),
            Arc::new(fetcher),
            endpoints,
            config.scan.clone(),
        ))
    }

    pub fn settings(&self) -> &ScanConfig {
        &self.settings
    }

    /// Scan `key`, optionally forcing the currency by symbol
    pub async fn scan(&self, key: &str, currency: Option<&str>) -> Result<ScanReport> {
        let currency = resolve_currency(key, currency, self.settings.testnet)?;

        if !self.resolver.endpoints().supports(&currency) {
            return Err(Error::UnsupportedCurrency(currency.symbol().to_string()));
        }

        let filter = self.settings.derivation_mode.as_deref();
        let label = mode_label(self.settings.balance_only, filter);

        info!("Scanning {} key on {}: {}", currency.symbol(), currency, label);

        let walker = Walker::new(self.deriver.as_ref(), &self.resolver, self.settings.gap_limit);
        let discovery = Orchestrator::new(walker, self.settings.concurrent_walks)
            .run(&currency, key, filter)
            .await?;

        let report = ScanReport::assemble(key, currency, label, discovery);

        info!(
            "Scan complete: {} active addresses, total balance {} {}",
            report.data.addresses.len(),
            report.total_balance(),
            currency.symbol()
        );

        Ok(report)
    }
}
