//! Address discovery
//!
//! For one extended public key:
//! - `walker` probes a single (derivation mode, account branch) pair
//! - `orchestrator` runs the walker over every mode and both branches
//! - `aggregate` sums balances per mode with exact decimals
//! - `report` packages the result with run metadata
//! - `scanner` ties it together behind `Scanner::scan`

pub mod address;
pub mod aggregate;
pub mod orchestrator;
pub mod own_addresses;
pub mod report;
pub mod scanner;
pub mod walker;

#[cfg(test)]
mod fakes;

pub use address::{Address, AddressStats};
pub use aggregate::{sum_balances, DerivationSummary};
pub use orchestrator::{Discovery, Orchestrator};
pub use own_addresses::OwnAddressSet;
pub use report::{mode_label, ScanMeta, ScanReport};
pub use scanner::Scanner;
pub use walker::{Action, GapPolicy, Probe, WalkOutcome, WalkState, Walker, DEFAULT_GAP_LIMIT};
