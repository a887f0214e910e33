//! Tolerant concurrent name resolution.
//!
//! Name backends fail and time out routinely; nothing here is allowed to
//! block or abort annotation of the underlying transfer. The pattern is
//! settle-all: drive every lookup to completion, keep the successes, drop
//! the rest.

use std::collections::HashMap;
use std::future::Future;

use futures::future::join_all;
use itertools::Itertools;
use tracing::debug;
use txlens_types::{Address, Network};

use crate::provider::NameResolver;

/// Drives every future to completion and collects the successful results in
/// input order. Never short-circuits on failure.
pub async fn settle_successes<T, E, F>(futures: Vec<F>) -> Vec<T>
where
    F: Future<Output = Result<T, E>>,
{
    join_all(futures)
        .await
        .into_iter()
        .filter_map(Result::ok)
        .collect()
}

/// Resolves names for all distinct addresses concurrently.
///
/// Failed or empty lookups are simply absent from the result; they never
/// surface as errors.
pub async fn resolve_names(
    resolver: &dyn NameResolver,
    addresses: &[Address],
    network: &Network,
) -> HashMap<Address, String> {
    let distinct: Vec<Address> = addresses.iter().copied().unique().collect();
    let lookups = distinct
        .iter()
        .map(|address| async move {
            match resolver.lookup(address, network).await {
                Ok(Some(name)) => Ok((*address, name)),
                Ok(None) => Err(()),
                Err(e) => {
                    debug!(
                        target: "txlens::names",
                        address = %address,
                        error = %e,
                        "Name lookup failed"
                    );
                    Err(())
                }
            }
        })
        .collect();

    settle_successes(lookups).await.into_iter().collect()
}

/// Resolves a single address, absorbing failure into `None`.
pub async fn resolve_name(
    resolver: &dyn NameResolver,
    address: &Address,
    network: &Network,
) -> Option<String> {
    match resolver.lookup(address, network).await {
        Ok(name) => name,
        Err(e) => {
            debug!(
                target: "txlens::names",
                address = %address,
                error = %e,
                "Name lookup failed"
            );
            None
        }
    }
}
