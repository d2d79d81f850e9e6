//! Process-backed deep-scan probe.
//!
//! Wraps a heavier external multi-source scanner (hundreds of sites) as a
//! single provider with an elevated timeout. The collaborator contract:
//! invoked as `cmd <query> --type <t> --json [--state S] [--deep]`, it
//! must either exit zero and print one JSON object to stdout, exit
//! non-zero but still print salvageable JSON, or produce nothing — in
//! which case (and on timeout, after the process is killed) the
//! manual-links fallback is substituted so the result is never empty.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::process;
use crate::provider::SourceProvider;
use crate::providers::manual::ManualLinksProbe;
use crate::query::Query;
use crate::types::SourceResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

const SOURCE: &str = "deep-scan";

/// External scanner provider. Only constructed when a scanner command is
/// configured and deep scan was requested.
pub struct ScannerProbe {
    command: String,
    config: LookupConfig,
}

impl ScannerProbe {
    pub fn new(command: String, config: &LookupConfig) -> Self {
        Self {
            command,
            config: config.clone(),
        }
    }

    fn args(query: &Query) -> Vec<String> {
        let mut args = vec![
            query.raw.clone(),
            "--type".to_owned(),
            query.query_type.name().to_owned(),
            "--json".to_owned(),
        ];
        if let Some(ref state) = query.state {
            args.push("--state".to_owned());
            args.push(state.clone());
        }
        args.push("--deep".to_owned());
        args
    }
}

#[async_trait]
impl SourceProvider for ScannerProbe {
    fn name(&self) -> &str {
        SOURCE
    }

    fn timeout(&self) -> Duration {
        // Elevated: the scanner probes hundreds of sites. The inner
        // process deadline below fires first; this outer margin only
        // covers spawn and parse overhead.
        Duration::from_secs(self.config.deep_timeout_seconds + 5)
    }

    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError> {
        let deadline = Duration::from_secs(self.config.deep_timeout_seconds);
        let outcome = process::run_with_deadline(&self.command, &Self::args(query), deadline).await;

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(LookupError::Timeout(reason)) => {
                // Forced kill already happened; substitute the
                // guaranteed-non-empty fallback instead of erroring.
                tracing::warn!(source = SOURCE, %reason, "scanner timed out, using fallback");
                return Ok(fallback_result(query, &reason));
            }
            Err(err) => return Err(err),
        };

        match salvage_json(&outcome.stdout) {
            Some(payload) => Ok(normalize(payload, outcome.exit_ok)),
            None if outcome.exit_ok => Err(LookupError::Parse(
                "scanner exited zero without JSON output".into(),
            )),
            None => Ok(fallback_result(query, "scanner produced no parseable output")),
        }
    }

    fn fallback(&self, query: &Query) -> Option<SourceResult> {
        Some(fallback_result(query, "scanner probe timed out"))
    }
}

/// Parse scanner stdout as a JSON object, tolerating log noise before or
/// after it. Used both on clean and non-zero exits.
fn salvage_json(stdout: &str) -> Option<Value> {
    let trimmed = stdout.trim();
    if let Ok(value @ Value::Object(_)) = serde_json::from_str(trimmed) {
        return Some(value);
    }
    // Salvage: widest substring that starts at the first `{` and ends at
    // the last `}`.
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str(&trimmed[start..=end]) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

fn normalize(payload: Value, exit_ok: bool) -> SourceResult {
    let mut data = match payload {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if !exit_ok {
        data.insert("salvaged".to_owned(), Value::Bool(true));
    }
    // The scanner reports its own match list; found iff it claims any.
    let found = data
        .get("profiles_found")
        .and_then(Value::as_u64)
        .map_or_else(
            || {
                data.get("results")
                    .and_then(Value::as_array)
                    .map_or(false, |r| !r.is_empty())
            },
            |n| n > 0,
        );
    SourceResult::new(SOURCE, found, data)
}

fn fallback_result(query: &Query, reason: &str) -> SourceResult {
    let mut result = ManualLinksProbe::result_for(query);
    result.source = SOURCE.to_owned();
    result
        .data
        .insert("fallback_reason".to_owned(), Value::String(reason.to_owned()));
    result
}
