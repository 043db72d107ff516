//! Test doubles for the deriver and the explorer

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::currency::{Currency, DerivationMode};
use crate::derive::{Account, AddressDeriver};
use crate::error::{Error, Result};
use crate::fetch::JsonFetcher;

/// Derives `{mode:?}-{account}-{index}`
pub struct PathDeriver;

impl PathDeriver {
    pub fn address(mode: DerivationMode, account: Account, index: u32) -> String {
        format!("{:?}-{}-{}", mode, account.index(), index)
    }
}

impl AddressDeriver for PathDeriver {
    fn derive(
        &self,
        _currency: &Currency,
        _key: &str,
        mode: DerivationMode,
        account: Account,
        index: u32,
    ) -> Result<String> {
        Ok(Self::address(mode, account, index))
    }
}

/// Explorer where only listed addresses have history
#[derive(Default)]
pub struct ScriptedExplorer {
    /// address -> (tx_count, funded sats)
    active: HashMap<String, (u64, u64)>,
    /// addresses whose stats request fails
    failing: Vec<String>,
    probes: Mutex<Vec<String>>,
}

impl ScriptedExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(mut self, mode: DerivationMode, account: Account, index: u32, funded: u64) -> Self {
        self.active
            .insert(PathDeriver::address(mode, account, index), (1, funded));
        self
    }

    pub fn failing(mut self, mode: DerivationMode, account: Account, index: u32) -> Self {
        self.failing.push(PathDeriver::address(mode, account, index));
        self
    }

    /// Addresses whose stats were requested, in request order
    pub fn probes(&self) -> Vec<String> {
        self.probes.lock().unwrap().clone()
    }

    pub fn probes_of(&self, mode: DerivationMode, account: Account) -> usize {
        let prefix = format!("{:?}-{}-", mode, account.index());
        self.probes()
            .iter()
            .filter(|address| address.starts_with(&prefix))
            .count()
    }
}

#[async_trait]
impl JsonFetcher for ScriptedExplorer {
    async fn get_json(&self, url: &str) -> Result<Value> {
        if url.ends_with("/txs") {
            return Ok(json!([{ "txid": "00" }]));
        }

        let address = url
            .rsplit('/')
            .next()
            .ok_or_else(|| Error::fetch(url, "no address in url"))?
            .to_string();
        self.probes.lock().unwrap().push(address.clone());

        if self.failing.contains(&address) {
            return Err(Error::fetch(url, "Status Code: 503 Service Unavailable"));
        }

        let (tx_count, funded) = self.active.get(&address).copied().unwrap_or((0, 0));
        Ok(json!({
            "chain_stats": {
                "tx_count": tx_count,
                "funded_txo_sum": funded,
                "spent_txo_sum": 0
            }
        }))
    }
}
