//! Addresses confirmed to belong to the scanned key

use serde::Serialize;

use super::Address;
use crate::derive::Account;

/// Active address strings partitioned by branch. Append-only during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OwnAddressSet {
    external: Vec<String>,
    internal: Vec<String>,
}

impl OwnAddressSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, address: &Address) {
        let branch = match address.account {
            Account::External => &mut self.external,
            Account::Internal => &mut self.internal,
        };
        branch.push(address.as_str().to_string());
    }

    pub fn external(&self) -> &[String] {
        &self.external
    }

    pub fn internal(&self) -> &[String] {
        &self.internal
    }

    /// Internal addresses first, then external
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.internal
            .iter()
            .chain(self.external.iter())
            .map(String::as_str)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.all().any(|own| own == address)
    }

    pub fn len(&self) -> usize {
        self.external.len() + self.internal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> Extend<&'a Address> for OwnAddressSet {
    fn extend<I: IntoIterator<Item = &'a Address>>(&mut self, addresses: I) {
        for address in addresses {
            self.add(address);
        }
    }
}
