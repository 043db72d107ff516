//! Gap-limit walker
//!
//! Probes one (derivation mode, account branch) pair from index 0 upward
//! and decides when the branch is exhausted.
//!
//! ```text
//! m/0/0 - active (10 transactions)
//! m/0/1 - active (2 transactions)
//! m/0/2 - inactive  ┐
//! m/0/3 - inactive  │ gap
//! m/0/4 - inactive  ┘
//! m/0/5 - active (4 transactions)
//! ```
//!
//! Receiving addresses tolerate up to `gap_limit` consecutive inactive
//! addresses before the walk stops. Change addresses stop at the first
//! inactive one, whatever the gap limit. Index n+1 is never probed before
//! index n is resolved: the stop decision depends on every prior probe.

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::Address;
use crate::currency::{Currency, DerivationMode};
use crate::derive::{Account, AddressDeriver};
use crate::error::Result;
use crate::explorer::StatsResolver;

/// Default number of consecutive inactive receiving addresses probed
pub const DEFAULT_GAP_LIMIT: u32 = 20;

/// Stop rule for one branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapPolicy {
    limit: u32,
}

impl GapPolicy {
    pub fn for_account(account: Account, gap_limit: u32) -> Self {
        let limit = match account {
            Account::External => gap_limit.max(1),
            Account::Internal => 1,
        };
        Self { limit }
    }

    /// Consecutive inactive addresses that end the walk
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// Outcome of probing one index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Inactive,
    Active { balance: Decimal },
}

impl Probe {
    pub fn of(address: &Address) -> Self {
        if address.is_active() {
            Probe::Active {
                balance: address.balance(),
            }
        } else {
            Probe::Inactive
        }
    }
}

/// What to do with the probed address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep the address, continue with the next index
    Record,
    /// Drop the address, continue with the next index
    Skip,
    /// Drop the address, the branch is exhausted
    Stop,
}

/// Fold state of a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkState {
    /// Next index to probe
    pub index: u32,
    /// Consecutive inactive addresses since the last active one
    pub inactive_run: u32,
    /// Balance of the active addresses seen so far
    pub subtotal: Decimal,
}

impl WalkState {
    /// Transition on the probe of `self.index`
    pub fn step(self, probe: Probe, policy: GapPolicy) -> (WalkState, Action) {
        match probe {
            Probe::Inactive => {
                let inactive_run = self.inactive_run + 1;
                let action = if inactive_run >= policy.limit() {
                    Action::Stop
                } else {
                    Action::Skip
                };
                let next = WalkState {
                    index: self.index.saturating_add(1),
                    inactive_run,
                    ..self
                };
                (next, action)
            }
            Probe::Active { balance } => {
                let next = WalkState {
                    index: self.index.saturating_add(1),
                    inactive_run: 0,
                    subtotal: self.subtotal + balance,
                };
                (next, Action::Record)
            }
        }
    }
}

/// Result of walking one branch
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    pub derivation_mode: DerivationMode,
    pub account: Account,
    pub subtotal: Decimal,
    /// Active addresses in index order
    pub addresses: Vec<Address>,
    /// Number of indices probed
    pub probes: u32,
}

/// Walks branches with a given deriver and resolver
pub struct Walker<'a> {
    deriver: &'a dyn AddressDeriver,
    resolver: &'a StatsResolver,
    gap_limit: u32,
}

impl<'a> Walker<'a> {
    pub fn new(deriver: &'a dyn AddressDeriver, resolver: &'a StatsResolver, gap_limit: u32) -> Self {
        Self {
            deriver,
            resolver,
            gap_limit,
        }
    }

    /// Probe `m/{account}/0..` until the gap policy says stop
    pub async fn walk(
        &self,
        currency: &Currency,
        key: &str,
        mode: DerivationMode,
        account: Account,
    ) -> Result<WalkOutcome> {
        let policy = GapPolicy::for_account(account, self.gap_limit);
        info!("- scanning {} {} addresses -", mode, account);

        let mut state = WalkState::default();
        let mut addresses = Vec::new();
        let mut probes = 0;

        loop {
            let index = state.index;
            let derived = self.deriver.derive(currency, key, mode, account, index)?;
            let mut address = Address::new(mode, account, index, derived);

            self.resolver.resolve(currency, &mut address).await?;
            probes += 1;

            let (next, action) = state.step(Probe::of(&address), policy);
            state = next;

            match action {
                Action::Record => {
                    info!(
                        "{} {} {} txs, balance {}",
                        address.path(),
                        address,
                        address.stats().map(|s| s.tx_count).unwrap_or_default(),
                        address.balance()
                    );
                    addresses.push(address);
                }
                Action::Skip => {
                    debug!("{} {} inactive, probing address gap", address.path(), address);
                }
                Action::Stop => break,
            }
        }

        info!(
            "- {} {} addresses scanned ({} probed, {} active) -",
            mode,
            account,
            probes,
            addresses.len()
        );

        Ok(WalkOutcome {
            derivation_mode: mode,
            account,
            subtotal: state.subtotal.normalize(),
            addresses,
            probes,
        })
    }
}
