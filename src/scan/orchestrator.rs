//! Derivation-mode orchestration
//!
//! Runs the walker over every applicable derivation mode and both account
//! branches, then merges the outcomes in the currency's declared mode order.

use futures::future::try_join_all;
use tracing::info;

use super::aggregate::{sum_balances, DerivationSummary};
use super::walker::{WalkOutcome, Walker};
use super::{Address, OwnAddressSet};
use crate::currency::{Currency, DerivationMode};
use crate::derive::Account;
use crate::error::{Error, Result};

/// Merged result of all walks of a scan
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// One per scanned mode, in declared mode order
    pub summaries: Vec<DerivationSummary>,
    /// Active addresses, by mode then external before internal then index
    pub addresses: Vec<Address>,
    pub own_addresses: OwnAddressSet,
}

/// Modes of `currency` to scan, optionally restricted by a label prefix
pub fn select_modes(currency: &Currency, filter: Option<&str>) -> Result<Vec<DerivationMode>> {
    let modes: Vec<DerivationMode> = currency
        .derivation_modes()
        .iter()
        .copied()
        .filter(|mode| filter.map_or(true, |prefix| mode.matches_prefix(prefix)))
        .collect();

    if modes.is_empty() {
        return Err(Error::Config(format!(
            "derivation mode '{}' matches none of {} modes",
            filter.unwrap_or_default(),
            currency.name()
        )));
    }

    Ok(modes)
}

pub struct Orchestrator<'a> {
    walker: Walker<'a>,
    concurrent: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(walker: Walker<'a>, concurrent: bool) -> Self {
        Self { walker, concurrent }
    }

    pub async fn run(
        &self,
        currency: &Currency,
        key: &str,
        filter: Option<&str>,
    ) -> Result<Discovery> {
        let modes = select_modes(currency, filter)?;

        let walker = &self.walker;
        let outcomes = if self.concurrent {
            let walks = modes.iter().copied().flat_map(move |mode| {
                Account::ALL
                    .into_iter()
                    .map(move |account| walker.walk(currency, key, mode, account))
            });
            // try_join_all keeps input order, whatever the completion order
            try_join_all(walks).await?
        } else {
            let mut outcomes = Vec::with_capacity(modes.len() * Account::ALL.len());
            for &mode in &modes {
                info!("- {} -", mode);
                for account in Account::ALL {
                    outcomes.push(walker.walk(currency, key, mode, account).await?);
                }
            }
            outcomes
        };

        Ok(merge(&modes, outcomes))
    }
}

fn merge(modes: &[DerivationMode], outcomes: Vec<WalkOutcome>) -> Discovery {
    let summaries = modes
        .iter()
        .map(|&mode| DerivationSummary {
            derivation_mode: mode,
            balance: sum_balances(
                outcomes
                    .iter()
                    .filter(|outcome| outcome.derivation_mode == mode)
                    .map(|outcome| outcome.subtotal),
            ),
        })
        .collect();

    let addresses: Vec<Address> = outcomes
        .into_iter()
        .flat_map(|outcome| outcome.addresses)
        .collect();

    let mut own_addresses = OwnAddressSet::new();
    own_addresses.extend(&addresses);

    Discovery {
        summaries,
        addresses,
        own_addresses,
    }
}
