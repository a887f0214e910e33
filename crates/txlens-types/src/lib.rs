//! Core data model for the txlens annotation engine.
//!
//! Everything here is a plain immutable value: transactions and logs as they
//! arrive from a chain data source, the asset catalog entries they are matched
//! against, and the `Annotation` values the engine produces. Optional data is
//! always an `Option`, never a sentinel.

pub mod address;
pub mod annotation;
pub mod asset;
pub mod transaction;

pub use address::{Address, Network};
pub use annotation::{Annotation, AnnotationKind, Warning};
pub use asset::{Asset, AssetAmount, CatalogAsset, FungibleAsset, NativeAsset, NftAsset};
pub use transaction::{Block, DecodedCall, EvmLog, TokenTransferLog, Transaction};

use thiserror::Error;

/// Errors produced when parsing externally supplied identifiers.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid address `{0}`: expected 20-byte 0x-prefixed hex")]
    InvalidAddress(String),
}
