//! Matching contract addresses against the cached asset catalog.

use txlens_types::{Address, CatalogAsset, FungibleAsset, NativeAsset};

/// Finds the fungible catalog entry backed by the given contract.
///
/// Linear scan, first match; the catalog holds at most one entry per
/// (network, address), and `Address` equality already normalizes case.
/// Native and NFT entries are ignored.
pub fn match_fungible<'a>(
    catalog: &'a [CatalogAsset],
    contract: &Address,
) -> Option<&'a FungibleAsset> {
    catalog.iter().find_map(|entry| match entry {
        CatalogAsset::Fungible(asset) if asset.contract == *contract => Some(asset),
        _ => None,
    })
}

/// The network's native base asset, taken from the catalog's native entry.
///
/// Falls back to the default 18-decimal descriptor when the catalog has no
/// native entry (or was unavailable), so value transfers still classify.
pub fn native_asset(catalog: &[CatalogAsset]) -> NativeAsset {
    catalog
        .iter()
        .find_map(|entry| match entry {
            CatalogAsset::Native(native) => Some(native.clone()),
            _ => None,
        })
        .unwrap_or_default()
}
