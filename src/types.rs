//! Core types for lookup results and aggregated profiles.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The canonical record every provider's raw payload is normalized into.
///
/// Exactly one `SourceResult` exists per applicable provider per request,
/// regardless of whether the probe succeeded, failed, or timed out. The
/// sequence order inside a [`Profile`] is the provider registry order, not
/// completion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceResult {
    /// Identifier of the provider that produced this result. Unique within
    /// one profile.
    pub source: String,
    /// Whether this source has a match for the query. Provider-specific
    /// heuristic; "no data" is a normal outcome, not an error.
    pub found: bool,
    /// Normalized key→value payload. Opaque beyond the per-family schema;
    /// extra upstream fields are preserved here for display but never
    /// participate in scoring or summaries.
    pub data: Map<String, Value>,
    /// Canonical link for this result, where one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// RFC 3339 capture timestamp.
    pub timestamp: String,
}

impl SourceResult {
    /// Build a result with the capture timestamp set to now.
    pub fn new(source: &str, found: bool, data: Map<String, Value>) -> Self {
        Self {
            source: source.to_owned(),
            found,
            data,
            url: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Build a `found = false` result carrying an error descriptor.
    /// Used by the orchestrator to degrade failed probes in place.
    pub fn degraded(source: &str, error: &str) -> Self {
        let mut data = Map::new();
        data.insert("error".to_owned(), Value::String(error.to_owned()));
        Self::new(source, false, data)
    }

    /// Attach a canonical link.
    pub fn with_url(mut self, url: String) -> Self {
        self.url = Some(url);
        self
    }
}

/// The assembled profile returned to the caller. Constructed once per
/// request after every probe settles; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// The raw query string as classified.
    pub query: String,
    /// The classified query type.
    pub query_type: crate::query::QueryType,
    /// One result per applicable provider, in registry order.
    pub results: Vec<SourceResult>,
    /// Composite risk score, `0..=100`. A pure function of the results'
    /// `found` flags.
    pub risk_score: u8,
    /// Type-specific derived summary with a fixed key schema.
    pub summary: Value,
}

/// Display bucketing for risk scores. Presentation-only; never feeds back
/// into scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Minimal,
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Bucket a score: `<20` minimal, `20–39` low, `40–59` moderate,
    /// `60–79` high, `>=80` critical.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=19 => Self::Minimal,
            20..=39 => Self::Low,
            40..=59 => Self::Moderate,
            60..=79 => Self::High,
            _ => Self::Critical,
        }
    }

    /// Human-readable label.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
