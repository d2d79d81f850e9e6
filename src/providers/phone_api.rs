//! Keyed phone-validation probes: Numverify and Veriphone.
//!
//! Both validate a phone number upstream and report carrier, line type,
//! and country. Found iff the upstream service says the number is valid.
//! Neither provider is constructed when its API key is absent.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http;
use crate::provider::SourceProvider;
use crate::query::Query;
use crate::types::SourceResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

/// Numverify validation probe (`apilayer.net`).
pub struct NumverifyProbe {
    api_key: String,
    config: LookupConfig,
    base_url: String,
}

impl NumverifyProbe {
    pub fn new(api_key: String, config: &LookupConfig) -> Self {
        Self {
            api_key,
            config: config.clone(),
            base_url: "http://apilayer.net".to_owned(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl SourceProvider for NumverifyProbe {
    fn name(&self) -> &str {
        "numverify"
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }

    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError> {
        let client = http::build_client(&self.config)?;
        let response = client
            .get(format!("{}/api/validate", self.base_url))
            .query(&[
                ("access_key", self.api_key.as_str()),
                ("number", query.raw.as_str()),
                ("format", "1"),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Http(format!("Numverify request failed: {e}")))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(format!("Numverify response malformed: {e}")))?;

        let valid = body.get("valid").and_then(Value::as_bool).unwrap_or(false);
        let mut data = Map::new();
        if valid {
            copy_fields(
                &body,
                &mut data,
                &[
                    ("valid", "valid"),
                    ("number", "number"),
                    ("local_format", "local_format"),
                    ("international_format", "international_format"),
                    ("country_name", "country"),
                    ("country_code", "country_code"),
                    ("location", "location"),
                    ("carrier", "carrier"),
                    ("line_type", "line_type"),
                ],
            );
        } else if let Value::Object(raw) = body {
            // Preserve whatever the upstream said, verbatim, for display.
            data = raw;
        }
        Ok(SourceResult::new("numverify", valid, data))
    }
}

/// Veriphone validation probe (`api.veriphone.io`).
pub struct VeriphoneProbe {
    api_key: String,
    config: LookupConfig,
    base_url: String,
}

impl VeriphoneProbe {
    pub fn new(api_key: String, config: &LookupConfig) -> Self {
        Self {
            api_key,
            config: config.clone(),
            base_url: "https://api.veriphone.io".to_owned(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl SourceProvider for VeriphoneProbe {
    fn name(&self) -> &str {
        "veriphone"
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }

    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError> {
        let client = http::build_client(&self.config)?;
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("phone", query.raw.clone()),
        ];
        if let Some(ref state) = query.state {
            params.push(("default_country", state.clone()));
        }

        let response = client
            .get(format!("{}/v2/verify", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(|e| LookupError::Http(format!("Veriphone request failed: {e}")))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(format!("Veriphone response malformed: {e}")))?;

        let success = body.get("status").and_then(Value::as_str) == Some("success");
        let valid = body
            .get("phone_valid")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let found = success && valid;

        let mut data = Map::new();
        if found {
            copy_fields(
                &body,
                &mut data,
                &[
                    ("phone_valid", "valid"),
                    ("phone", "phone"),
                    ("e164", "e164"),
                    ("country", "country"),
                    ("carrier", "carrier"),
                    ("phone_type", "line_type"),
                ],
            );
        } else if let Value::Object(raw) = body {
            data = raw;
        }
        Ok(SourceResult::new("veriphone", found, data))
    }
}

/// Copy selected upstream fields into the canonical payload under their
/// canonical names, skipping absent/null values.
fn copy_fields(body: &Value, data: &mut Map<String, Value>, fields: &[(&str, &str)]) {
    for (upstream, canonical) in fields {
        if let Some(value) = body.get(*upstream) {
            if !value.is_null() {
                data.insert((*canonical).to_owned(), value.clone());
            }
        }
    }
}
