//! Collaborator interfaces the engine consumes.
//!
//! These are capability sets, not wire formats: implementations typically sit
//! on top of an RPC client and a cache, but the engine only sees the traits.
//! All methods may be called concurrently; failures are absorbed by the
//! engine at each call site.

use anyhow::Result;
use async_trait::async_trait;
use primitive_types::H256;
use txlens_types::{Address, AssetAmount, Block, CatalogAsset, Network};

/// Source of chain state: tracked accounts, balances, and block data.
#[async_trait]
pub trait ChainDataSource: Send + Sync {
    /// The accounts the surrounding system tracks locally. Used to filter
    /// log-derived transfers down to relevant ones.
    async fn accounts_to_track(&self) -> Result<Vec<Address>>;

    /// The account's current balance in the network's base asset.
    async fn latest_base_balance(
        &self,
        account: &Address,
        network: &Network,
    ) -> Result<AssetAmount>;

    /// Block data for a mined transaction's containing block.
    async fn block_by_hash(&self, network: &Network, hash: &H256) -> Result<Block>;
}

/// Source of the cached per-network asset registry.
#[async_trait]
pub trait AssetCatalogSource: Send + Sync {
    /// All cached catalog entries for the network, fungible or not; the
    /// engine filters to the variants it needs.
    async fn cached_assets(&self, network: &Network) -> Result<Vec<CatalogAsset>>;
}

/// Resolves addresses to human-readable names (domain names, address books).
///
/// Lookups must be idempotent and safe to issue concurrently; backends are
/// expected to be flaky and slow, so callers fan out and tolerate individual
/// failures.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn lookup(&self, address: &Address, network: &Network) -> Result<Option<String>>;
}
