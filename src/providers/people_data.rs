//! Keyed people-data search probe.
//!
//! Searches a commercial person index by first name, last name, and
//! region. Found iff at least one person record matches. Emails and phone
//! numbers from matched records are truncated to two each before they
//! enter the canonical payload. Not constructed without an API key.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http;
use crate::provider::SourceProvider;
use crate::query::Query;
use crate::types::SourceResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

const SOURCE: &str = "people-data";

/// Records carried in the canonical payload are capped at the upstream
/// page size we request.
const PAGE_SIZE: usize = 10;

/// Person-index search probe keyed by name and region.
pub struct PeopleDataProbe {
    api_key: String,
    config: LookupConfig,
    base_url: String,
}

impl PeopleDataProbe {
    pub fn new(api_key: String, config: &LookupConfig) -> Self {
        Self {
            api_key,
            config: config.clone(),
            base_url: "https://api.peopledatalabs.com".to_owned(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl SourceProvider for PeopleDataProbe {
    fn name(&self) -> &str {
        SOURCE
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds + 5)
    }

    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError> {
        let (first, last) = query.name_parts();
        let mut must = vec![
            serde_json::json!({"term": {"first_name": first.to_lowercase()}}),
            serde_json::json!({"term": {"last_name": last.to_lowercase()}}),
        ];
        if let Some(ref state) = query.state {
            must.push(serde_json::json!({"term": {"location_region": state.to_uppercase()}}));
        }
        let search = serde_json::json!({
            "query": {"bool": {"must": must}},
            "size": PAGE_SIZE,
        });

        let client = http::build_client(&self.config)?;
        let response = client
            .post(format!("{}/v5/person/search", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .json(&search)
            .send()
            .await
            .map_err(|e| LookupError::Http(format!("people-data request failed: {e}")))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(format!("people-data response malformed: {e}")))?;

        let records = body.get("data").and_then(Value::as_array);
        if !status.is_success() || records.map_or(true, |r| r.is_empty()) {
            let mut data = Map::new();
            data.insert(
                "message".to_owned(),
                Value::String("No results found".to_owned()),
            );
            return Ok(SourceResult::new(SOURCE, false, data));
        }

        let people: Vec<Value> = records
            .into_iter()
            .flatten()
            .map(normalize_person)
            .collect();
        let mut data = Map::new();
        data.insert(
            "total_results".to_owned(),
            body.get("total").cloned().unwrap_or(Value::Null),
        );
        data.insert("people".to_owned(), Value::Array(people));
        Ok(SourceResult::new(SOURCE, true, data))
    }
}

/// Project a person record down to the declared fields, truncating
/// contact lists to two entries each.
fn normalize_person(person: &Value) -> Value {
    let truncated = |key: &str| -> Value {
        person
            .get(key)
            .and_then(Value::as_array)
            .map(|items| Value::Array(items.iter().take(2).cloned().collect()))
            .unwrap_or_else(|| Value::Array(vec![]))
    };
    serde_json::json!({
        "full_name": person.get("full_name"),
        "first_name": person.get("first_name"),
        "last_name": person.get("last_name"),
        "location": person.get("location_name"),
        "job_title": person.get("job_title"),
        "company": person.get("job_company_name"),
        "linkedin": person.get("linkedin_url"),
        "emails": truncated("emails"),
        "phones": truncated("phone_numbers"),
    })
}
