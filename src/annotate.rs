//! Transaction classification and enrichment.
//!
//! [`Annotator`] is the engine's entry point. It reconciles the raw
//! transaction, its logs, chain state, and cached metadata into a single
//! [`Annotation`]. Every step degrades on failure: a missing collaborator
//! response means an absent optional field or a fallback classification,
//! never an error out of [`Annotator::annotate`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use primitive_types::U256;
use tracing::debug;
use txlens_erc20::{calldata::decode_erc20_call, logs};
use txlens_types::{
    Address, Annotation, AnnotationKind, Asset, AssetAmount, CatalogAsset, DecodedCall, EvmLog,
    FungibleAsset, Network, Transaction, Warning,
};

use crate::provider::{AssetCatalogSource, ChainDataSource, NameResolver};
use crate::{assets, names};

/// Default number of fractional digits carried on display amounts.
pub const DEFAULT_DISPLAY_PRECISION: i64 = 6;

/// The annotation engine.
///
/// Holds the three collaborators and a display-precision setting; carries no
/// other state, so a single instance can annotate concurrently.
pub struct Annotator {
    chain: Arc<dyn ChainDataSource>,
    catalog: Arc<dyn AssetCatalogSource>,
    resolver: Arc<dyn NameResolver>,
    precision: i64,
}

impl Annotator {
    pub fn new(
        chain: Arc<dyn ChainDataSource>,
        catalog: Arc<dyn AssetCatalogSource>,
        resolver: Arc<dyn NameResolver>,
    ) -> Self {
        Self {
            chain,
            catalog,
            resolver,
            precision: DEFAULT_DISPLAY_PRECISION,
        }
    }

    /// Sets the number of fractional digits display amounts are rounded to.
    pub fn with_precision(mut self, precision: i64) -> Self {
        self.precision = precision;
        self
    }

    /// Classifies a transaction into an [`Annotation`].
    ///
    /// Never returns an error: unrecognized call data, missing catalog
    /// entries, and collaborator failures all degrade to
    /// `contract-interaction` or an absent optional field.
    pub async fn annotate(&self, tx: &Transaction, network: &Network) -> Annotation {
        let created_at = Utc::now();

        // Independent fetches; each absorbs its own failure.
        let (affordability, block_timestamp, catalog) = tokio::join!(
            self.check_affordability(tx, network),
            self.fetch_block_timestamp(tx, network),
            self.fetch_catalog(network),
        );

        let mut warnings = Vec::new();
        if let Some(warning) = affordability {
            warnings.push(warning);
        }

        let kind = self.classify(tx, network, &catalog, &mut warnings).await;

        let children = match tx.logs.as_deref() {
            Some(tx_logs) if !tx_logs.is_empty() => {
                self.derive_children(tx_logs, network, &catalog, created_at, block_timestamp)
                    .await
            }
            _ => Vec::new(),
        };

        Annotation::new(kind, created_at)
            .with_block_timestamp(block_timestamp)
            .with_children(children)
            .with_warnings(warnings)
    }

    /// Pre-submission affordability check: `gas_limit * max_fee_per_gas +
    /// value` against the sender's base balance. Only runs for requests
    /// (gas limit and both fee fields present); never changes the
    /// classification.
    async fn check_affordability(&self, tx: &Transaction, network: &Network) -> Option<Warning> {
        if !tx.is_request() {
            return None;
        }
        let gas_limit = tx.gas_limit?;
        let max_fee = tx.max_fee_per_gas?;

        let balance = match self.chain.latest_base_balance(&tx.from, network).await {
            Ok(balance) => balance,
            Err(e) => {
                debug!(
                    target: "txlens::annotate",
                    account = %tx.from,
                    error = %e,
                    "Balance fetch failed, skipping affordability check"
                );
                return None;
            }
        };

        // An unrepresentable worst-case cost can never be covered.
        let cost = gas_limit
            .checked_mul(max_fee)
            .and_then(|fees| fees.checked_add(tx.value.unwrap_or_else(U256::zero)));
        match cost {
            Some(cost) if cost <= balance.raw => None,
            _ => Some(Warning::InsufficientFunds),
        }
    }

    async fn fetch_block_timestamp(
        &self,
        tx: &Transaction,
        network: &Network,
    ) -> Option<DateTime<Utc>> {
        let hash = tx.block_hash.as_ref()?;
        match self.chain.block_by_hash(network, hash).await {
            Ok(block) => Some(block.timestamp),
            Err(e) => {
                debug!(
                    target: "txlens::annotate",
                    block_hash = %hash,
                    error = %e,
                    "Block fetch failed, leaving timestamp absent"
                );
                None
            }
        }
    }

    async fn fetch_catalog(&self, network: &Network) -> Vec<CatalogAsset> {
        match self.catalog.cached_assets(network).await {
            Ok(catalog) => catalog,
            Err(e) => {
                debug!(
                    target: "txlens::annotate",
                    network = %network,
                    error = %e,
                    "Asset catalog unavailable, classifying without it"
                );
                Vec::new()
            }
        }
    }

    /// The primary classification state machine. Starts from
    /// `contract-interaction` and transitions based on recipient, value, and
    /// call data.
    async fn classify(
        &self,
        tx: &Transaction,
        network: &Network,
        catalog: &[CatalogAsset],
        warnings: &mut Vec<Warning>,
    ) -> AnnotationKind {
        let Some(to) = tx.to else {
            return AnnotationKind::ContractDeployment;
        };

        if !tx.has_call_data() {
            let name = names::resolve_name(self.resolver.as_ref(), &to, network).await;
            // Tri-state on value: an explicit zero still transfers the native
            // asset; an absent value is a plain interaction (fallback/receive
            // path with unknown intent).
            return match tx.value {
                Some(value) => {
                    let native = assets::native_asset(catalog);
                    let logo = native.logo.clone();
                    AnnotationKind::AssetTransfer {
                        sender: tx.from,
                        recipient: to,
                        recipient_name: name,
                        amount: AssetAmount::new(Asset::Native(native), value)
                            .enrich(self.precision),
                        logo,
                    }
                }
                None => AnnotationKind::ContractInteraction {
                    contract_name: name,
                    logo: None,
                },
            };
        }

        let matched = assets::match_fungible(catalog, &to);
        let decoded = tx.data.as_deref().and_then(decode_erc20_call);

        match (matched, decoded) {
            (Some(asset), Some(DecodedCall::Transfer { to: recipient, amount })) => {
                self.token_transfer(asset, tx.from, recipient, amount, network, warnings)
                    .await
            }
            (Some(asset), Some(DecodedCall::TransferFrom { from, to: recipient, amount })) => {
                self.token_transfer(asset, from, recipient, amount, network, warnings)
                    .await
            }
            (Some(asset), Some(DecodedCall::Approve { spender, value })) => {
                let spender_name =
                    names::resolve_name(self.resolver.as_ref(), &spender, network).await;
                AnnotationKind::AssetApproval {
                    spender,
                    spender_name,
                    amount: AssetAmount::new(Asset::Fungible(asset.clone()), value)
                        .enrich(self.precision),
                    logo: asset.logo.clone(),
                }
            }
            // No asset match or no recognized call: fall back, but keep the
            // matched asset's logo when there is one.
            (matched, _) => {
                let name = names::resolve_name(self.resolver.as_ref(), &to, network).await;
                AnnotationKind::ContractInteraction {
                    contract_name: name,
                    logo: matched.and_then(|asset| asset.logo.clone()),
                }
            }
        }
    }

    async fn token_transfer(
        &self,
        asset: &FungibleAsset,
        sender: Address,
        recipient: Address,
        amount: U256,
        network: &Network,
        warnings: &mut Vec<Warning>,
    ) -> AnnotationKind {
        if recipient == asset.contract {
            warnings.push(Warning::SendToToken);
        }
        let recipient_name =
            names::resolve_name(self.resolver.as_ref(), &recipient, network).await;
        AnnotationKind::AssetTransfer {
            sender,
            recipient,
            recipient_name,
            amount: AssetAmount::new(Asset::Fungible(asset.clone()), amount)
                .enrich(self.precision),
            logo: asset.logo.clone(),
        }
    }

    /// Builds one child `asset-transfer` annotation per recognized token
    /// transfer in the logs that touches a tracked account and matches a
    /// catalog asset, preserving log order.
    async fn derive_children(
        &self,
        tx_logs: &[EvmLog],
        network: &Network,
        catalog: &[CatalogAsset],
        created_at: DateTime<Utc>,
        block_timestamp: Option<DateTime<Utc>>,
    ) -> Vec<Annotation> {
        let transfers = logs::parse_transfer_logs(tx_logs);
        if transfers.is_empty() {
            return Vec::new();
        }

        let tracked = match self.chain.accounts_to_track().await {
            Ok(tracked) => tracked,
            Err(e) => {
                debug!(
                    target: "txlens::annotate",
                    error = %e,
                    "Tracked accounts unavailable, skipping sub-annotations"
                );
                return Vec::new();
            }
        };

        let transfers = logs::filter_by_tracked(transfers, &tracked);
        if transfers.is_empty() {
            return Vec::new();
        }

        let recipients: Vec<Address> = transfers.iter().map(|t| t.to).collect();
        let resolved = names::resolve_names(self.resolver.as_ref(), &recipients, network).await;

        transfers
            .into_iter()
            .filter_map(|transfer| {
                // Transfers of unknown contracts are dropped, not reported.
                let asset = assets::match_fungible(catalog, &transfer.contract)?;
                let kind = AnnotationKind::AssetTransfer {
                    sender: transfer.from,
                    recipient: transfer.to,
                    recipient_name: resolved.get(&transfer.to).cloned(),
                    amount: AssetAmount::new(Asset::Fungible(asset.clone()), transfer.amount)
                        .enrich(self.precision),
                    logo: asset.logo.clone(),
                };
                Some(Annotation::new(kind, created_at).with_block_timestamp(block_timestamp))
            })
            .collect()
    }
}
