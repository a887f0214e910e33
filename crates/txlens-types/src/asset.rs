//! Asset catalog entries and decimal-normalized amounts.

use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::Address;

/// An entry in the cached per-network asset catalog.
///
/// The catalog mixes contract-backed fungible tokens with the network's
/// native currency and NFT collections; consumers match on the variant they
/// care about instead of probing field shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CatalogAsset {
    Fungible(FungibleAsset),
    Native(NativeAsset),
    NonFungible(NftAsset),
}

/// A contract-backed fungible token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FungibleAsset {
    pub symbol: String,
    pub decimals: u8,
    pub contract: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// A network's native gas-paying currency. Not contract-backed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeAsset {
    pub symbol: String,
    pub decimals: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Default for NativeAsset {
    fn default() -> Self {
        Self {
            symbol: "ETH".to_string(),
            decimals: 18,
            logo: None,
        }
    }
}

/// A non-fungible collection. Carried in the catalog but never the subject
/// of an amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftAsset {
    pub symbol: String,
    pub contract: Address,
}

/// The asset half of an amount: either the native currency or a matched
/// fungible token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Asset {
    Fungible(FungibleAsset),
    Native(NativeAsset),
}

impl Asset {
    pub fn symbol(&self) -> &str {
        match self {
            Self::Fungible(asset) => &asset.symbol,
            Self::Native(asset) => &asset.symbol,
        }
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Self::Fungible(asset) => asset.decimals,
            Self::Native(asset) => asset.decimals,
        }
    }

    pub fn logo(&self) -> Option<&str> {
        match self {
            Self::Fungible(asset) => asset.logo.as_deref(),
            Self::Native(asset) => asset.logo.as_deref(),
        }
    }

    /// The backing contract, if any. Native assets have none.
    pub fn contract(&self) -> Option<&Address> {
        match self {
            Self::Fungible(asset) => Some(&asset.contract),
            Self::Native(_) => None,
        }
    }
}

/// An asset paired with a raw amount in the asset's base units.
///
/// `display` is the decimal-normalized form (`raw / 10^decimals`), present
/// only after [`AssetAmount::enrich`] has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAmount {
    pub asset: Asset,
    pub raw: U256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<BigDecimal>,
}

impl AssetAmount {
    pub fn new(asset: Asset, raw: U256) -> Self {
        Self {
            asset,
            raw,
            display: None,
        }
    }

    /// Computes the display amount: `raw / 10^decimals`, rounded half-up to
    /// at most `precision` fractional digits. The division itself is exact
    /// (base-10 divisor), so no precision beyond the requested rounding is
    /// lost.
    pub fn enrich(mut self, precision: i64) -> Self {
        let raw = BigDecimal::from_str(&self.raw.to_string())
            .unwrap_or_else(|_| BigDecimal::zero());
        let divisor = BigDecimal::from_str(&format!("1{}", "0".repeat(self.asset.decimals() as usize)))
            .unwrap_or_else(|_| BigDecimal::from(1));
        let exact = raw / divisor;
        let display = if exact.fractional_digit_count() > precision {
            exact.with_scale_round(precision, RoundingMode::HalfUp)
        } else {
            exact
        };
        self.display = Some(display);
        self
    }
}
