//! Concurrent probe fan-out with per-provider failure isolation.
//!
//! Every applicable provider runs concurrently under its own deadline.
//! Design rule: no single provider's failure or timeout aborts the batch.
//! A failing probe yields a `found = false` result with an error
//! descriptor in its data mapping; a timed-out probe yields the
//! provider's fallback if it declares one. The output sequence preserves
//! registry order regardless of completion order.

use crate::provider::SourceProvider;
use crate::query::Query;
use crate::types::SourceResult;

/// Fan out `providers` for `query` and collect one settled result per
/// provider, in input order.
///
/// # Pipeline
///
/// 1. Wrap each probe in `tokio::time::timeout(provider.timeout())`
/// 2. Run all futures concurrently with [`futures::future::join_all`]
///    (which preserves input order)
/// 3. Degrade per-probe errors and timeouts into `found = false` results
///    or declared fallbacks; log at warn level
///
/// This function itself is infallible: there is always exactly one
/// result per provider.
pub async fn run_probes(
    query: &Query,
    providers: &[Box<dyn SourceProvider>],
) -> Vec<SourceResult> {
    let futures: Vec<_> = providers
        .iter()
        .map(|provider| async move {
            let outcome =
                tokio::time::timeout(provider.timeout(), provider.probe(query)).await;
            settle(provider.as_ref(), query, outcome)
        })
        .collect();

    let results = futures::future::join_all(futures).await;

    let found = results.iter().filter(|r| r.found).count();
    tracing::debug!(
        total = results.len(),
        found,
        query_type = %query.query_type,
        "probes settled"
    );
    results
}

/// Map one probe outcome to its canonical result.
fn settle(
    provider: &dyn SourceProvider,
    query: &Query,
    outcome: Result<Result<SourceResult, crate::error::LookupError>, tokio::time::error::Elapsed>,
) -> SourceResult {
    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            tracing::warn!(source = provider.name(), error = %err, "probe failed");
            SourceResult::degraded(provider.name(), &err.to_string())
        }
        Err(_) => {
            tracing::warn!(source = provider.name(), "probe timed out");
            provider
                .fallback(query)
                .unwrap_or_else(|| SourceResult::degraded(provider.name(), "probe timed out"))
        }
    }
}
