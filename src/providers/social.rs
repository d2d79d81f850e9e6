//! Social-platform presence probes.
//!
//! One lightweight existence check per platform: fetch the would-be
//! profile URL following redirects and call the username present iff the
//! final status is exactly 200. This is a documented heuristic — some
//! platforms answer 200 with a soft error page and some block anonymous
//! requests outright — and we accept the false-positive/false-negative
//! risk rather than sniffing page content. A stricter per-platform
//! strategy can replace any single probe without touching the
//! orchestrator.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http;
use crate::provider::SourceProvider;
use crate::query::{Query, QueryType};
use crate::types::SourceResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

/// Platforms covered by the presence bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Twitter,
    Instagram,
    Github,
    Reddit,
    Linkedin,
    Tiktok,
    Youtube,
    Facebook,
    Twitch,
    Pinterest,
}

impl Platform {
    /// All platforms, in registry order.
    pub fn all() -> &'static [Platform] {
        &[
            Self::Twitter,
            Self::Instagram,
            Self::Github,
            Self::Reddit,
            Self::Linkedin,
            Self::Tiktok,
            Self::Youtube,
            Self::Facebook,
            Self::Twitch,
            Self::Pinterest,
        ]
    }

    /// Lowercase platform label.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
            Self::Github => "github",
            Self::Reddit => "reddit",
            Self::Linkedin => "linkedin",
            Self::Tiktok => "tiktok",
            Self::Youtube => "youtube",
            Self::Facebook => "facebook",
            Self::Twitch => "twitch",
            Self::Pinterest => "pinterest",
        }
    }

    /// The would-be profile URL for `username` on this platform.
    pub fn profile_url(&self, username: &str) -> String {
        let u = urlencoding::encode(username);
        match self {
            Self::Twitter => format!("https://twitter.com/{u}"),
            Self::Instagram => format!("https://instagram.com/{u}"),
            Self::Github => format!("https://github.com/{u}"),
            Self::Reddit => format!("https://reddit.com/user/{u}"),
            Self::Linkedin => format!("https://linkedin.com/in/{u}"),
            Self::Tiktok => format!("https://tiktok.com/@{u}"),
            Self::Youtube => format!("https://youtube.com/@{u}"),
            Self::Facebook => format!("https://facebook.com/{u}"),
            Self::Twitch => format!("https://twitch.tv/{u}"),
            Self::Pinterest => format!("https://pinterest.com/{u}"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Existence probe for a single platform.
pub struct SocialProbe {
    platform: Platform,
    source: String,
    config: LookupConfig,
    override_url: Option<String>,
}

impl SocialProbe {
    pub fn new(platform: Platform, config: &LookupConfig) -> Self {
        Self {
            platform,
            source: format!("social:{}", platform.name()),
            config: config.clone(),
            override_url: None,
        }
    }

    #[cfg(test)]
    fn with_override_url(mut self, url: String) -> Self {
        self.override_url = Some(url);
        self
    }

    fn subject<'a>(&self, query: &'a Query) -> &'a str {
        match query.query_type {
            QueryType::Email => query.email_local_part(),
            _ => query.raw.as_str(),
        }
    }
}

#[async_trait]
impl SourceProvider for SocialProbe {
    fn name(&self) -> &str {
        &self.source
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }

    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError> {
        let username = self.subject(query);
        let profile_url = self.platform.profile_url(username);
        let request_url = self.override_url.clone().unwrap_or_else(|| profile_url.clone());

        let client = http::build_client(&self.config)?;
        let response = client
            .get(&request_url)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                LookupError::Http(format!("{} request failed: {e}", self.platform))
            })?;

        let status = response.status();
        let found = status == reqwest::StatusCode::OK;
        tracing::trace!(platform = %self.platform, %status, found, "presence probe");

        let mut data = Map::new();
        data.insert(
            "platform".to_owned(),
            Value::String(self.platform.name().to_owned()),
        );
        data.insert("status".to_owned(), Value::from(status.as_u16()));
        data.insert("profile_url".to_owned(), Value::String(profile_url.clone()));

        let mut result = SourceResult::new(&self.source, found, data);
        if found {
            result = result.with_url(profile_url);
        }
        Ok(result)
    }
}
