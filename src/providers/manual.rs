//! Manual-links probe: the graceful-degradation fallback family.
//!
//! Never performs a lookup. Unconditionally `found` with a non-empty list
//! of external manual-search URLs, templated from the query where the
//! target site supports it. This guarantees the caller an actionable next
//! step even when every automated source fails or is unconfigured; the
//! orchestrator also substitutes this payload when a process-backed probe
//! times out.

use crate::error::LookupError;
use crate::provider::SourceProvider;
use crate::query::{Query, QueryType};
use crate::types::SourceResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

const SOURCE: &str = "manual-links";

/// Fixed/templated manual-search link provider.
pub struct ManualLinksProbe;

impl ManualLinksProbe {
    /// Build the always-found result for `query`. Shared with the
    /// orchestrator's timeout-fallback path, which is why this is not
    /// only reachable through `probe`.
    pub fn result_for(query: &Query) -> SourceResult {
        let links = links_for(query);
        let mut data = Map::new();
        data.insert("manual_search_links".to_owned(), Value::Array(links));
        data.insert(
            "note".to_owned(),
            Value::String(
                "These sources do not offer public APIs; use the links for manual lookup."
                    .to_owned(),
            ),
        );
        SourceResult::new(SOURCE, true, data)
    }
}

fn link(name: &str, url: String) -> Value {
    serde_json::json!({"name": name, "url": url})
}

/// Templated links per query type. Every branch returns a non-empty list.
fn links_for(query: &Query) -> Vec<Value> {
    match query.query_type {
        QueryType::Name => {
            let (first, last) = query.name_parts();
            let state = query.state.as_deref().unwrap_or("");
            let first = urlencoding::encode(first);
            let last = urlencoding::encode(last);
            let state_enc = urlencoding::encode(state);
            vec![
                link(
                    "TruePeopleSearch",
                    format!(
                        "https://www.truepeoplesearch.com/results?name={first}%20{last}&citystatezip={state_enc}"
                    ),
                ),
                link(
                    "FastPeopleSearch",
                    format!("https://www.fastpeoplesearch.com/name/{first}-{last}_{state_enc}"),
                ),
                link(
                    "Whitepages",
                    format!("https://www.whitepages.com/name/{first}-{last}/{state_enc}"),
                ),
                link(
                    "ThatsThem",
                    format!("https://thatsthem.com/name/{first}-{last}/{state_enc}"),
                ),
            ]
        }
        QueryType::Email | QueryType::Username => {
            let subject = match query.query_type {
                QueryType::Email => query.email_local_part(),
                _ => query.raw.as_str(),
            };
            let subject = urlencoding::encode(subject);
            vec![
                link(
                    "Google",
                    format!("https://www.google.com/search?q=%22{subject}%22"),
                ),
                link(
                    "Namechk",
                    format!("https://namechk.com/search/{subject}"),
                ),
                link("WhatsMyName", "https://whatsmyname.app/".to_owned()),
            ]
        }
        QueryType::Phone => {
            let number = urlencoding::encode(&query.raw);
            vec![
                link(
                    "Google",
                    format!("https://www.google.com/search?q=%22{number}%22"),
                ),
                link(
                    "NumLookup",
                    format!("https://www.numlookup.com/search?phone={number}"),
                ),
            ]
        }
    }
}

#[async_trait]
impl SourceProvider for ManualLinksProbe {
    fn name(&self) -> &str {
        SOURCE
    }

    fn timeout(&self) -> Duration {
        // No I/O; the deadline is a formality.
        Duration::from_secs(1)
    }

    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError> {
        Ok(Self::result_for(query))
    }
}
