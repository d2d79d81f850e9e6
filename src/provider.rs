//! Trait definition for pluggable lookup source providers.
//!
//! Each external or local data source (breach index, avatar host, social
//! platforms, phone parsers, court records, ...) implements
//! [`SourceProvider`] to expose a single uniform probe operation. The
//! registry holds providers as trait objects in a fixed per-type order;
//! there is no hierarchy beyond this one interface.

use crate::error::LookupError;
use crate::query::Query;
use crate::types::SourceResult;
use async_trait::async_trait;
use std::time::Duration;

/// A pluggable lookup source.
///
/// Implementors handle their own request construction, upstream quirks,
/// and the provider-specific `found` determination. Probe failures are
/// returned as errors and degraded by the orchestrator; a probe must never
/// panic or abort the batch.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Stable identifier for this source. Unique within one registry.
    fn name(&self) -> &str;

    /// The deadline the orchestrator enforces around this provider's
    /// probe. Process-backed providers elevate this.
    fn timeout(&self) -> Duration;

    /// Query the source and normalize its payload into the canonical
    /// result shape.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the request fails or the response cannot
    /// be parsed. "The source has no data" is **not** an error: it is an
    /// `Ok` result with `found = false`.
    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError>;

    /// Substitute result used when this provider's probe times out.
    ///
    /// Providers backed by long-running external processes return a
    /// guaranteed non-empty fallback here (manual-search links) so the
    /// caller always has an actionable next step. The default is `None`,
    /// meaning a plain degraded result is used.
    fn fallback(&self, query: &Query) -> Option<SourceResult> {
        let _ = query;
        None
    }
}
