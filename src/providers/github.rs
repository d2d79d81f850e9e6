//! Code-hosting profile probe via the public GitHub users API.
//!
//! Keyed by username (or an email's local part). No authentication needed;
//! a 404 means the user does not exist and is a normal `found = false`.

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

const SOURCE: &str = "github";

/// Profile-metadata probe against the code-hosting users API.
pub struct GithubProbe {
    config: LookupConfig,
    base_url: String,
}

impl GithubProbe {
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            config: config.clone(),
            base_url: "https://api.github.com".to_owned(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Email queries probe with the local part; everything else with the
    /// raw string.
    fn probe_subject<'a>(query: &'a Query) -> &'a str {
        match query.query_type {
            crate::query::QueryType::Email => query.email_local_part(),
            _ => query.raw.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    html_url: String,
    name: Option<String>,
    bio: Option<String>,
    company: Option<String>,
    location: Option<String>,
    email: Option<String>,
    blog: Option<String>,
    twitter_username: Option<String>,
    followers: u64,
    following: u64,
    public_repos: u64,
    created_at: String,
    avatar_url: Option<String>,
}

#[async_trait]
impl SourceProvider for GithubProbe {
    fn name(&self) -> &str {
        SOURCE
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }

    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError> {
        let subject = Self::probe_subject(query);
        let url = format!("{}/users/{}", self.base_url, urlencoding::encode(subject));

        let client = http::build_client(&self.config)?;
        let response = client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| LookupError::Http(format!("GitHub request failed: {e}")))?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let user: GithubUser = response.json().await.map_err(|e| {
                    LookupError::Parse(format!("GitHub response malformed: {e}"))
                })?;
                Ok(normalize(user))
            }
            reqwest::StatusCode::NOT_FOUND => {
                let mut data = Map::new();
                data.insert(
                    "message".to_owned(),
                    Value::String("User not found".to_owned()),
                );
                Ok(SourceResult::new(SOURCE, false, data))
            }
            status => Err(LookupError::Http(format!(
                "GitHub answered HTTP {status}"
            ))),
        }
    }
}

fn normalize(user: GithubUser) -> SourceResult {
    let mut data = Map::new();
    data.insert("username".to_owned(), Value::String(user.login));
    let optional = [
        ("name", user.name),
        ("bio", user.bio),
        ("company", user.company),
        ("location", user.location),
        ("email", user.email),
        ("blog", user.blog),
        ("twitter", user.twitter_username),
        ("avatar_url", user.avatar_url),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            data.insert(key.to_owned(), Value::String(value));
        }
    }
    data.insert("followers".to_owned(), Value::from(user.followers));
    data.insert("following".to_owned(), Value::from(user.following));
    data.insert("public_repos".to_owned(), Value::from(user.public_repos));
    data.insert("created_at".to_owned(), Value::String(user.created_at));

    SourceResult::new(SOURCE, true, data).with_url(user.html_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryType;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn username_query(raw: &str) -> Query {
        Query::classify(raw, Some(QueryType::Username), None, false).expect("valid")
    }

    #[tokio::test]
    async fn existing_user_is_found_with_profile_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "login": "octocat",
                "html_url": "https://github.com/octocat",
                "name": "The Octocat",
                "bio": null,
                "company": "GitHub",
                "location": "San Francisco",
                "email": null,
                "blog": "https://github.blog",
                "twitter_username": null,
                "followers": 4000,
                "following": 9,
                "public_repos": 8,
                "created_at": "2011-01-25T18:44:36Z",
                "avatar_url": "https://avatars.githubusercontent.com/u/583231"
            })))
            .mount(&server)
            .await;

        let probe = GithubProbe::new(&LookupConfig::default()).with_base_url(server.uri());
        let result = probe.probe(&username_query("octocat")).await.expect("ok");
        assert!(result.found);
        assert_eq!(result.url.as_deref(), Some("https://github.com/octocat"));
        assert_eq!(
            result.data.get("company").and_then(Value::as_str),
            Some("GitHub")
        );
        // null upstream fields never appear in the canonical payload
        assert!(!result.data.contains_key("bio"));
    }

    #[tokio::test]
    async fn missing_user_is_not_found_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let probe = GithubProbe::new(&LookupConfig::default()).with_base_url(server.uri());
        let result = probe.probe(&username_query("no-such-user")).await.expect("ok");
        assert!(!result.found);
    }

    #[tokio::test]
    async fn rate_limited_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let probe = GithubProbe::new(&LookupConfig::default()).with_base_url(server.uri());
        let err = probe.probe(&username_query("octocat")).await.unwrap_err();
        assert!(matches!(err, LookupError::Http(_)));
    }

    #[test]
    fn email_query_probes_local_part() {
        let query =
            Query::classify("octocat@example.com", Some(QueryType::Email), None, false)
                .expect("valid");
        assert_eq!(GithubProbe::probe_subject(&query), "octocat");
    }
}
