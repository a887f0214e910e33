//! Txlens - transaction annotation engine for EVM chains.
//!
//! Given a raw or pending transaction (plus its logs and containing block,
//! when available), the engine produces an [`Annotation`]: a structured
//! classification of what the transaction does (value transfer, token
//! transfer, approval, deployment, or generic contract call), enriched with
//! resolved names, asset metadata, decimal-normalized amounts, and risk
//! warnings.
//!
//! Chain state, the cached asset catalog, and name resolution are external
//! collaborators behind the traits in [`provider`]; every collaborator
//! failure is absorbed, so classification always yields a best-effort
//! annotation rather than an error.

pub mod annotate;
pub mod assets;
pub mod names;
pub mod provider;

pub use annotate::{Annotator, DEFAULT_DISPLAY_PRECISION};
pub use provider::{AssetCatalogSource, ChainDataSource, NameResolver};

// Re-export commonly used pieces for downstream consumers
pub use async_trait::async_trait;
pub use txlens_erc20 as erc20;
pub use txlens_types as types;
pub use txlens_types::{Annotation, AnnotationKind, Warning};
