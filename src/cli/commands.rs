//! CLI command implementations

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::scan::{ScanReport, Scanner};

/// Scan a key and print the discovered balances
pub async fn scan(config: &Config, key: &str, currency: Option<&str>, output: Option<&Path>) -> Result<()> {
    let scanner = Scanner::from_config(config).context("Failed to initialize scanner")?;

    let report = scanner.scan(key, currency).await?;

    print_report(&report);

    if let Some(path) = output {
        let json = report.to_json_pretty()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}

/// Show current configuration
pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.display());
    Ok(())
}

fn print_report(report: &ScanReport) {
    let symbol = report.meta.currency.symbol();

    println!("\n=== {} ===\n", report.meta.mode.to_uppercase());
    println!("Key: {}", report.meta.key);
    println!("Currency: {}", report.meta.currency);
    println!("Date: {}", report.meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));

    println!("\n=== ACTIVE ADDRESSES ===\n");
    if report.data.addresses.is_empty() {
        println!("No active address found.");
    } else {
        println!(
            "{:<15} {:<8} {:<64} {:>6} {:>20}",
            "MODE", "PATH", "ADDRESS", "TXS", "BALANCE"
        );
        println!("{}", "-".repeat(117));
        for address in &report.data.addresses {
            println!(
                "{:<15} {:<8} {:<64} {:>6} {:>20}",
                address.derivation_mode.label(),
                address.path(),
                address.as_str(),
                address.stats().map(|s| s.tx_count).unwrap_or_default(),
                address.balance().to_string()
            );
        }
    }

    println!("\n=== SUMMARY ===\n");
    for summary in &report.data.summaries {
        println!(
            "{:<15} {:>20} {}",
            summary.derivation_mode.label(),
            summary.balance.to_string(),
            symbol
        );
    }
    println!("{}", "-".repeat(40));
    println!("{:<15} {:>20} {}", "Total", report.total_balance().to_string(), symbol);
    println!();
}
