//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub explorer: ExplorerConfig,
}

/// Address discovery settings
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Consecutive inactive receiving addresses probed before a branch is exhausted
    #[serde(default = "default_gap_limit")]
    pub gap_limit: u32,
    /// Force testnet network selection
    #[serde(default)]
    pub testnet: bool,
    /// Restrict the scan to derivation modes starting with this prefix (case-insensitive)
    #[serde(default)]
    pub derivation_mode: Option<String>,
    /// Skip fetching transaction lists of active addresses
    #[serde(default)]
    pub balance_only: bool,
    /// Run independent (mode, branch) walks concurrently
    #[serde(default)]
    pub concurrent_walks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            gap_limit: default_gap_limit(),
            testnet: false,
            derivation_mode: None,
            balance_only: false,
            concurrent_walks: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default)]
    pub retry_delay_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            retry_delay_ms: 0,
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExplorerConfig {
    /// URL templates keyed by currency symbol, e.g. `btc = "https://.../{network}api/address/{address}"`
    #[serde(default)]
    pub endpoints: HashMap<String, String>,
}

// Default value functions
fn default_gap_limit() -> u32 {
    crate::scan::DEFAULT_GAP_LIMIT
}

fn default_retries() -> u32 {
    crate::fetch::retry::DEFAULT_RETRIES
}

fn default_timeout_ms() -> u64 {
    30000
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Start with defaults
            .set_default("scan.gap_limit", default_gap_limit() as i64)?
            .set_default("fetch.retries", default_retries() as i64)?
            .set_default("fetch.retry_delay_ms", 0i64)?
            .set_default("fetch.timeout_ms", default_timeout_ms() as i64)?
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix XPUB_SCAN)
            .add_source(
                config::Environment::with_prefix("XPUB_SCAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.scan.gap_limit == 0 {
            anyhow::bail!("gap_limit must be positive");
        }

        if self.fetch.timeout_ms == 0 {
            anyhow::bail!("timeout_ms must be positive");
        }

        if self.fetch.retries == 0 {
            tracing::warn!("fetch.retries is 0 - every request will fail without being sent");
        }

        if let Some(mode) = &self.scan.derivation_mode {
            if mode.trim().is_empty() {
                anyhow::bail!("derivation_mode filter cannot be empty");
            }
        }

        for (symbol, template) in &self.explorer.endpoints {
            if !template.contains("{address}") {
                anyhow::bail!("Explorer endpoint for {} lacks an {{address}} placeholder", symbol);
            }
            let probe = template
                .replace("{network}", "")
                .replace("{address}", "probe");
            url::Url::parse(&probe)
                .with_context(|| format!("Invalid explorer endpoint for {}: {}", symbol, template))?;
        }

        Ok(())
    }

    /// Render the effective configuration for display
    pub fn display(&self) -> String {
        let mut endpoints: Vec<_> = self.explorer.endpoints.iter().collect();
        endpoints.sort();

        let mut out = format!(
            r#"Configuration:
  Scan:
    gap_limit: {}
    testnet: {}
    derivation_mode: {}
    balance_only: {}
    concurrent_walks: {}
  Fetch:
    retries: {}
    retry_delay: {}ms
    timeout: {}ms
  Explorer endpoints:
"#,
            self.scan.gap_limit,
            self.scan.testnet,
            self.scan.derivation_mode.as_deref().unwrap_or("(all)"),
            self.scan.balance_only,
            self.scan.concurrent_walks,
            self.fetch.retries,
            self.fetch.retry_delay_ms,
            self.fetch.timeout_ms,
        );

        if endpoints.is_empty() {
            out.push_str("    (built-in)\n");
        }
        for (symbol, template) in endpoints {
            out.push_str(&format!("    {}: {}\n", symbol, template));
        }

        out
    }
}
