//! Gravatar identity-hash probe.
//!
//! Derives the SHA-256 content hash of the normalized email (trimmed,
//! lowercased) and checks for an avatar at the well-known endpoint with
//! `d=404`, so a missing avatar answers 404 instead of a generated
//! placeholder. Found iff the endpoint answers 200.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http;
use crate::provider::SourceProvider;
use crate::query::Query;
use crate::types::SourceResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::time::Duration;

const SOURCE: &str = "gravatar";

/// Avatar existence probe keyed by email hash.
pub struct GravatarProbe {
    config: LookupConfig,
    base_url: String,
}

impl GravatarProbe {
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            config: config.clone(),
            base_url: "https://gravatar.com".to_owned(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Hash of the normalized email, per the Gravatar contract.
pub(crate) fn email_hash(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    hex::encode(Sha256::digest(normalized.as_bytes()))
}

#[async_trait]
impl SourceProvider for GravatarProbe {
    fn name(&self) -> &str {
        SOURCE
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }

    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError> {
        let hash = email_hash(&query.raw);
        let avatar_url = format!("{}/avatar/{hash}?d=404", self.base_url);

        let client = http::build_client(&self.config)?;
        let response = client
            .get(&avatar_url)
            .send()
            .await
            .map_err(|e| LookupError::Http(format!("Gravatar request failed: {e}")))?;

        let found = response.status() == reqwest::StatusCode::OK;

        let mut data = Map::new();
        data.insert("hash".to_owned(), Value::String(hash.clone()));
        data.insert(
            "profile_url".to_owned(),
            Value::String(format!("https://gravatar.com/{hash}")),
        );
        let mut result = SourceResult::new(SOURCE, found, data);
        if found {
            result = result.with_url(format!("https://gravatar.com/avatar/{hash}"));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryType;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn hash_normalizes_case_and_whitespace() {
        assert_eq!(email_hash("  User@Example.COM "), email_hash("user@example.com"));
    }

    #[test]
    fn hash_is_hex_sha256() {
        let hash = email_hash("user@example.com");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn avatar_present_is_found() {
        let server = MockServer::start().await;
        let hash = email_hash("user@example.com");
        Mock::given(method("GET"))
            .and(path(format!("/avatar/{hash}")))
            .and(query_param("d", "404"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let probe = GravatarProbe::new(&LookupConfig::default()).with_base_url(server.uri());
        let query =
            Query::classify("user@example.com", Some(QueryType::Email), None, false).expect("valid");
        let result = probe.probe(&query).await.expect("probe ok");
        assert!(result.found);
        assert!(result.url.expect("url").contains(&hash));
    }

    #[tokio::test]
    async fn avatar_absent_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let probe = GravatarProbe::new(&LookupConfig::default()).with_base_url(server.uri());
        let query =
            Query::classify("ghost@example.com", Some(QueryType::Email), None, false).expect("valid");
        let result = probe.probe(&query).await.expect("probe ok");
        assert!(!result.found);
        assert!(result.url.is_none());
        // hash still reported so the caller can check manually
        assert!(result.data.contains_key("hash"));
    }
}
