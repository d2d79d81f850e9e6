//! LeakCheck breach-database probe.
//!
//! Queries the LeakCheck v2 credential-leak index by email. Found iff the
//! index reports at least one matched record. Requires an API key; the
//! registry does not construct this provider without one.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http;
use crate::provider::SourceProvider;
use crate::query::Query;
use crate::types::SourceResult;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

const SOURCE: &str = "leakcheck";

/// Breach-index probe keyed by email.
pub struct BreachProbe {
    api_key: String,
    config: LookupConfig,
    base_url: String,
}

impl BreachProbe {
    pub fn new(api_key: String, config: &LookupConfig) -> Self {
        Self {
            api_key,
            config: config.clone(),
            base_url: "https://leakcheck.io".to_owned(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[derive(Debug, Deserialize)]
struct LeakCheckResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    found: u64,
    #[serde(default)]
    result: Vec<Value>,
}

#[async_trait]
impl SourceProvider for BreachProbe {
    fn name(&self) -> &str {
        SOURCE
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds + 5)
    }

    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError> {
        tracing::trace!(source = SOURCE, "breach index probe");

        let client = http::build_client(&self.config)?;
        let url = format!(
            "{}/api/v2/query/{}",
            self.base_url,
            urlencoding::encode(&query.raw)
        );

        let response = client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| LookupError::Http(format!("LeakCheck request failed: {e}")))?;

        let body: LeakCheckResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(format!("LeakCheck response malformed: {e}")))?;

        Ok(normalize(body))
    }
}

/// Map the upstream shape into the canonical record. Found iff the index
/// matched at least one record.
fn normalize(body: LeakCheckResponse) -> SourceResult {
    let found = body.success && body.found > 0;
    let mut data = Map::new();
    if found {
        data.insert("breaches_found".to_owned(), Value::from(body.found));
        data.insert("breaches".to_owned(), Value::Array(body.result));
    } else {
        data.insert(
            "message".to_owned(),
            Value::String("No breaches found".to_owned()),
        );
    }
    SourceResult::new(SOURCE, found, data)
}
