//! # footprint
//!
//! Identity footprint lookup: fan a single identity fragment (email,
//! phone number, username, or full name) out to a set of public data
//! sources concurrently, normalize whatever comes back into one record
//! shape, and aggregate the hits into a profile with a risk score.
//!
//! ## Design
//!
//! - One [`provider::SourceProvider`] per public source, selected per
//!   query type from a fixed registry order
//! - Probes run concurrently; a failed or timed-out probe degrades into
//!   a `found = false` result instead of failing the lookup
//! - Credential-gated providers are simply skipped when their API key is
//!   absent, so the crate works out of the box with zero configuration
//! - Scoring and summaries are pure functions of the settled results
//!
//! ## Security
//!
//! - API keys are read from the environment once and never logged
//! - Queries are personal identifiers; they are logged only at debug
//!   level and never persisted

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod process;
pub mod provider;
pub mod providers;
pub mod query;
pub mod registry;
pub mod server;
pub mod types;

pub use config::{ApiCredentials, LookupConfig};
pub use error::{LookupError, Result};
pub use provider::SourceProvider;
pub use query::{Query, QueryType};
pub use types::{Profile, RiskLevel, SourceResult};

/// Run a full lookup for a raw query string.
///
/// Classifies and validates the input (an explicit `hint` wins over
/// auto-detection), probes every applicable source concurrently, and
/// assembles the settled results into a [`Profile`] with a risk score
/// and a type-specific summary.
///
/// # Errors
///
/// Returns [`LookupError::InvalidQuery`] when the input fails
/// classification, and [`LookupError::Config`] when `config` is
/// internally inconsistent. Individual source failures never surface
/// here; they appear as degraded entries in `Profile::results`.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> footprint::Result<()> {
/// let config = footprint::LookupConfig::default();
/// let profile = footprint::lookup("user@example.com", None, None, false, &config).await?;
/// println!("risk {} across {} sources", profile.risk_score, profile.results.len());
/// # Ok(())
/// # }
/// ```
pub async fn lookup(
    raw: &str,
    hint: Option<QueryType>,
    state: Option<String>,
    deep_scan: bool,
    config: &LookupConfig,
) -> Result<Profile> {
    config.validate()?;
    let query = Query::classify(raw, hint, state, deep_scan)?;
    Ok(lookup_classified(&query, config).await)
}

/// Run a lookup for an already-classified query. Infallible: every
/// probe failure degrades in place.
pub async fn lookup_classified(query: &Query, config: &LookupConfig) -> Profile {
    let providers = registry::providers_for(query.query_type, query.deep_scan, config);
    tracing::debug!(
        query_type = %query.query_type,
        providers = providers.len(),
        deep_scan = query.deep_scan,
        "starting lookup"
    );

    let results = orchestrator::fanout::run_probes(query, &providers).await;
    let risk_score = orchestrator::scoring::risk_score(&results);
    let summary = orchestrator::summary::build_summary(query.query_type, &results);

    Profile {
        query: query.raw.clone(),
        query_type: query.query_type,
        results,
        risk_score,
        summary,
    }
}
