//! Mock collaborators and fixtures for testing the txlens engine.
//!
//! Each mock is a plain struct with programmable responses: a `None` slot
//! makes the corresponding method fail, so tests can exercise the engine's
//! degradation paths without wiring up real backends.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use primitive_types::{H160, H256, U256};
use txlens::provider::{AssetCatalogSource, ChainDataSource, NameResolver};
use txlens_erc20::logs::TRANSFER_TOPIC;
use txlens_types::{
    Address, Asset, AssetAmount, Block, CatalogAsset, EvmLog, FungibleAsset, NativeAsset, Network,
};

/// A short deterministic test address.
pub fn addr(n: u64) -> Address {
    Address::new(H160::from_low_u64_be(n))
}

/// A fungible catalog entry.
pub fn fungible(symbol: &str, decimals: u8, contract: Address) -> CatalogAsset {
    CatalogAsset::Fungible(FungibleAsset {
        symbol: symbol.to_string(),
        decimals,
        contract,
        logo: None,
    })
}

/// A native base-asset balance of `raw` wei-scale units.
pub fn native_balance(raw: U256) -> AssetAmount {
    AssetAmount::new(Asset::Native(NativeAsset::default()), raw)
}

/// A standard ERC-20 Transfer log.
pub fn transfer_log(contract: Address, from: Address, to: Address, amount: u64) -> EvmLog {
    EvmLog {
        address: contract,
        topics: vec![TRANSFER_TOPIC, from.into_word(), to.into_word()],
        data: U256::from(amount).to_big_endian().to_vec(),
    }
}

/// Mock [`ChainDataSource`]. `None` slots fail the corresponding call.
pub struct MockChain {
    pub tracked: Option<Vec<Address>>,
    pub balance: Option<AssetAmount>,
    pub block: Option<Block>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self {
            tracked: Some(Vec::new()),
            balance: None,
            block: None,
        }
    }
}

#[async_trait]
impl ChainDataSource for MockChain {
    async fn accounts_to_track(&self) -> Result<Vec<Address>> {
        self.tracked
            .clone()
            .ok_or_else(|| anyhow!("tracked accounts unavailable"))
    }

    async fn latest_base_balance(
        &self,
        _account: &Address,
        _network: &Network,
    ) -> Result<AssetAmount> {
        self.balance
            .clone()
            .ok_or_else(|| anyhow!("balance unavailable"))
    }

    async fn block_by_hash(&self, _network: &Network, _hash: &H256) -> Result<Block> {
        self.block.clone().ok_or_else(|| anyhow!("block unavailable"))
    }
}

/// Mock [`AssetCatalogSource`]. A `None` catalog fails the call.
#[derive(Default)]
pub struct MockCatalog {
    pub assets: Option<Vec<CatalogAsset>>,
}

impl MockCatalog {
    pub fn with_assets(assets: Vec<CatalogAsset>) -> Self {
        Self {
            assets: Some(assets),
        }
    }
}

#[async_trait]
impl AssetCatalogSource for MockCatalog {
    async fn cached_assets(&self, _network: &Network) -> Result<Vec<CatalogAsset>> {
        self.assets
            .clone()
            .ok_or_else(|| anyhow!("catalog unavailable"))
    }
}

/// Mock [`NameResolver`] with per-address names, injectable failures, and
/// lookup recording.
#[derive(Default)]
pub struct MockResolver {
    pub names: HashMap<Address, String>,
    pub failing: HashSet<Address>,
    pub lookups: Mutex<Vec<Address>>,
}

impl MockResolver {
    pub fn with_names(entries: &[(Address, &str)]) -> Self {
        Self {
            names: entries
                .iter()
                .map(|(address, name)| (*address, (*name).to_string()))
                .collect(),
            ..Default::default()
        }
    }

    /// Addresses looked up so far, in call order.
    pub fn recorded_lookups(&self) -> Vec<Address> {
        self.lookups.lock().expect("lookup log poisoned").clone()
    }
}

#[async_trait]
impl NameResolver for MockResolver {
    async fn lookup(&self, address: &Address, _network: &Network) -> Result<Option<String>> {
        self.lookups.lock().expect("lookup log poisoned").push(*address);
        if self.failing.contains(address) {
            return Err(anyhow!("resolver timeout"));
        }
        Ok(self.names.get(address).cloned())
    }
}
