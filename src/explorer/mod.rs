//! Block explorer access
//!
//! Esplora-style REST API:
//! - `GET {base}/address/{address}`: confirmed tx count, funded and spent sums
//! - `GET {base}/address/{address}/txs`: raw transactions of an active address

pub mod endpoints;
pub mod resolver;
pub mod schema;

pub use endpoints::ExplorerEndpoints;
pub use resolver::{to_account_unit, StatsResolver};
pub use schema::{AddressDocument, ChainStats};
