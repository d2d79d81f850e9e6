//! CourtListener legal-record probe.
//!
//! Queries the public court-record index by full name. No credential
//! needed. Found iff at least one case matches.

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

const SOURCE: &str = "courtlistener";

/// Cases carried in the canonical payload are capped; the total count is
/// still reported.
const MAX_CASES: usize = 10;

/// Public court-record probe keyed by full name.
pub struct CourtRecordProbe {
    config: LookupConfig,
    base_url: String,
}

impl CourtRecordProbe {
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            config: config.clone(),
            base_url: "https://www.courtlistener.com".to_owned(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[derive(Debug, Deserialize)]
struct CourtSearchResponse {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    results: Vec<CourtCase>,
}

#[derive(Debug, Deserialize)]
struct CourtCase {
    #[serde(rename = "caseName")]
    case_name: Option<String>,
    court: Option<String>,
    #[serde(rename = "dateFiled")]
    date_filed: Option<String>,
    #[serde(rename = "docketNumber")]
    docket_number: Option<String>,
    #[serde(default)]
    absolute_url: String,
}

#[async_trait]
impl SourceProvider for CourtRecordProbe {
    fn name(&self) -> &str {
        SOURCE
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds + 5)
    }

    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError> {
        let client = http::build_client(&self.config)?;
        let response = client
            .get(format!("{}/api/rest/v4/search/", self.base_url))
            .query(&[("q", query.raw.as_str()), ("type", "r")])
            .send()
            .await
            .map_err(|e| LookupError::Http(format!("CourtListener request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(LookupError::Http(format!(
                "CourtListener answered HTTP {}",
                response.status()
            )));
        }

        let body: CourtSearchResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(format!("CourtListener response malformed: {e}")))?;

        Ok(normalize(body, &self.base_url))
    }
}

fn normalize(body: CourtSearchResponse, base_url: &str) -> SourceResult {
    let cases: Vec<Value> = body
        .results
        .into_iter()
        .take(MAX_CASES)
        .map(|case| {
            serde_json::json!({
                "case_name": case.case_name,
                "court": case.court,
                "date_filed": case.date_filed,
                "docket_number": case.docket_number,
                "url": format!("{base_url}{}", case.absolute_url),
            })
        })
        .collect();

    let found = !cases.is_empty();
    let mut data = Map::new();
    data.insert("total_results".to_owned(), Value::from(body.count));
    data.insert("cases".to_owned(), Value::Array(cases));
    SourceResult::new(SOURCE, found, data)
}
