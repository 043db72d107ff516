//! xpub-scan library
//!
//! Discovers the active addresses of an extended public key and sums
//! their balances per derivation mode.

pub mod cli;
pub mod config;
pub mod currency;
pub mod derive;
pub mod error;
pub mod explorer;
pub mod fetch;
pub mod scan;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use scan::{ScanReport, Scanner};
