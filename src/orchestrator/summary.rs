//! Type-specific summary derivation.
//!
//! Each query type has a fixed summary schema computed purely from the
//! settled result sequence — the summary holds no information that is not
//! already present there. Unknown provider fields never leak in; only the
//! canonical per-family keys participate.

use crate::orchestrator::scoring::risk_score;
use crate::query::QueryType;
use crate::types::{RiskLevel, SourceResult};
use serde_json::Value;

/// Profiles listed in a username summary are capped to keep response
/// sizes bounded; the total count is still reported.
const MAX_LISTED_PROFILES: usize = 20;

/// Legal cases listed in a name summary.
const MAX_LISTED_CASES: usize = 5;

/// Derive the summary mapping for `query_type` from the settled results.
pub fn build_summary(query_type: QueryType, results: &[SourceResult]) -> Value {
    match query_type {
        QueryType::Email => email_summary(results),
        QueryType::Phone => phone_summary(results),
        QueryType::Username => username_summary(results),
        QueryType::Name => name_summary(results),
    }
}

fn email_summary(results: &[SourceResult]) -> Value {
    let breaches_found = results
        .iter()
        .find(|r| r.source == "leakcheck")
        .and_then(|r| r.data.get("breaches_found"))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let platforms = present_platforms(results);
    let score = risk_score(results);

    serde_json::json!({
        "sources_checked": results.len(),
        "sources_found": found_count(results),
        "breaches_found": breaches_found,
        "social_profiles": platforms.len(),
        "platforms": platforms,
        "recommendation": recommendation(score),
    })
}

fn phone_summary(results: &[SourceResult]) -> Value {
    // Merge the canonical phone fields across found results; later
    // sources refine earlier ones, mirroring registry order.
    let mut valid = false;
    let mut formatted: Option<Value> = None;
    let mut country: Option<Value> = None;
    let mut carrier: Option<Value> = None;
    let mut line_type: Option<Value> = None;
    let mut location: Option<Value> = None;

    for result in results.iter().filter(|r| r.found) {
        if result.data.get("valid").and_then(Value::as_bool) == Some(true) {
            valid = true;
        }
        let formatted_value = result
            .data
            .get("e164")
            .or_else(|| result.data.get("international"))
            .or_else(|| result.data.get("international_format"));
        merge(&mut formatted, formatted_value);
        merge(&mut country, result.data.get("country"));
        merge(&mut carrier, result.data.get("carrier"));
        merge(&mut line_type, result.data.get("line_type"));
        merge(&mut location, result.data.get("location"));
    }

    serde_json::json!({
        "sources_checked": results.len(),
        "valid": valid,
        "formatted": formatted,
        "country": country,
        "carrier": carrier,
        "line_type": line_type,
        "location": location,
    })
}

fn username_summary(results: &[SourceResult]) -> Value {
    let profiles = collect_profiles(results);
    let platforms: Vec<String> = {
        let mut seen = std::collections::BTreeSet::new();
        profiles
            .iter()
            .filter_map(|p| p.get("platform").and_then(Value::as_str))
            .filter(|name| seen.insert(name.to_owned()))
            .map(str::to_owned)
            .collect()
    };

    serde_json::json!({
        "sources_checked": results.len(),
        "total_profiles": profiles.len(),
        "platforms": platforms,
        "profiles": profiles.into_iter().take(MAX_LISTED_PROFILES).collect::<Vec<_>>(),
    })
}

fn name_summary(results: &[SourceResult]) -> Value {
    let court = results.iter().find(|r| r.source == "courtlistener");
    let legal_cases_found = court
        .filter(|r| r.found)
        .and_then(|r| r.data.get("total_results"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let legal_cases: Vec<Value> = court
        .filter(|r| r.found)
        .and_then(|r| r.data.get("cases"))
        .and_then(Value::as_array)
        .map(|cases| cases.iter().take(MAX_LISTED_CASES).cloned().collect())
        .unwrap_or_default();

    let people_profiles: Vec<Value> = results
        .iter()
        .find(|r| r.source == "people-data" && r.found)
        .and_then(|r| r.data.get("people"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let manual_search_links: Vec<Value> = results
        .iter()
        .find(|r| r.source == "manual-links")
        .and_then(|r| r.data.get("manual_search_links"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    serde_json::json!({
        "sources_checked": results.len(),
        "legal_cases_found": legal_cases_found,
        "legal_cases": legal_cases,
        "people_profiles": people_profiles,
        "manual_search_links": manual_search_links,
    })
}

fn found_count(results: &[SourceResult]) -> usize {
    results.iter().filter(|r| r.found).count()
}

/// Platform names (social presence probes plus the code-hosting probe)
/// where the subject was present, in result order.
fn present_platforms(results: &[SourceResult]) -> Vec<String> {
    results
        .iter()
        .filter(|r| r.found)
        .filter_map(|r| {
            if let Some(platform) = r.data.get("platform").and_then(Value::as_str) {
                Some(platform.to_owned())
            } else if r.source == "github" {
                Some("github".to_owned())
            } else {
                None
            }
        })
        .collect()
}

fn merge(slot: &mut Option<Value>, value: Option<&Value>) {
    if let Some(value) = value {
        if !value.is_null() {
            *slot = Some(value.clone());
        }
    }
}

/// Canonical comparison key for a profile URL: lowercased scheme and
/// host, no fragment, no query, no trailing slash. Unparseable input is
/// compared verbatim.
fn profile_url_key(raw: &str) -> String {
    let Ok(mut parsed) = url::Url::parse(raw) else {
        return raw.to_owned();
    };
    parsed.set_fragment(None);
    parsed.set_query(None);
    let path = parsed.path().to_owned();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(&path[..path.len() - 1]);
    }
    parsed.to_string()
}

/// Candidate profile links from found results: social presence probes,
/// the code-hosting probe, and any profile list a deep scanner reported.
/// Deduplicated by normalized URL.
fn collect_profiles(results: &[SourceResult]) -> Vec<Value> {
    let mut seen_urls = std::collections::HashSet::new();
    let mut profiles = Vec::new();

    let mut push = |platform: &str, url: &str| {
        if seen_urls.insert(profile_url_key(url)) {
            profiles.push(serde_json::json!({"platform": platform, "url": url}));
        }
    };

    for result in results.iter().filter(|r| r.found) {
        if let Some(platform) = result.data.get("platform").and_then(Value::as_str) {
            if let Some(url) = result.url.as_deref() {
                push(platform, url);
            }
        } else if result.source == "github" {
            if let Some(url) = result.url.as_deref() {
                push("github", url);
            }
        } else if let Some(list) = result.data.get("profiles").and_then(Value::as_array) {
            for entry in list {
                let platform = entry
                    .get("platform")
                    .or_else(|| entry.get("site"))
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                if let Some(url) = entry.get("url").and_then(Value::as_str) {
                    push(&platform.to_lowercase(), url);
                }
            }
        }
    }

    profiles
}

/// Actionable recommendation per risk bucket.
fn recommendation(score: u8) -> &'static str {
    match RiskLevel::from_score(score) {
        RiskLevel::Critical => {
            "CRITICAL: Immediate action required. Change all passwords, enable 2FA on all accounts, and consider identity monitoring."
        }
        RiskLevel::High => {
            "HIGH RISK: Change passwords for any breached accounts. Enable 2FA. Review account activity."
        }
        RiskLevel::Moderate => {
            "MODERATE RISK: Review exposed accounts. Consider changing passwords and enabling 2FA."
        }
        RiskLevel::Low => {
            "LOW RISK: Your digital footprint exists. Ensure strong, unique passwords and 2FA where available."
        }
        RiskLevel::Minimal => {
            "MINIMAL EXPOSURE: Good security hygiene. Continue monitoring periodically."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn result(source: &str, found: bool, data: Value) -> SourceResult {
        let data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        SourceResult::new(source, found, data)
    }

    fn social(platform: &str, found: bool) -> SourceResult {
        let mut r = result(
            &format!("social:{platform}"),
            found,
            serde_json::json!({"platform": platform, "status": if found { 200 } else { 404 }}),
        );
        if found {
            r = r.with_url(format!("https://{platform}.example/user"));
        }
        r
    }

    #[test]
    fn email_summary_counts_breaches_and_platforms() {
        let results = vec![
            result("leakcheck", true, serde_json::json!({"breaches_found": 3})),
            result("gravatar", false, serde_json::json!({})),
            social("twitter", true),
            social("reddit", false),
            result("github", true, serde_json::json!({"username": "x"}))
                .with_url("https://github.com/x".into()),
        ];
        let summary = build_summary(QueryType::Email, &results);
        assert_eq!(summary["sources_checked"], 5);
        assert_eq!(summary["sources_found"], 3);
        assert_eq!(summary["breaches_found"], 3);
        assert_eq!(summary["social_profiles"], 2);
        let platforms = summary["platforms"].as_array().expect("platforms");
        assert!(platforms.contains(&Value::String("twitter".into())));
    }

    #[test]
    fn email_summary_has_fixed_schema_even_when_nothing_found() {
        let results = vec![result("gravatar", false, serde_json::json!({}))];
        let summary = build_summary(QueryType::Email, &results);
        for key in [
            "sources_checked",
            "sources_found",
            "breaches_found",
            "social_profiles",
            "platforms",
            "recommendation",
        ] {
            assert!(summary.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(summary["breaches_found"], 0);
    }

    #[test]
    fn phone_summary_merges_found_sources_in_order() {
        let results = vec![
            result(
                "phone-structure",
                true,
                serde_json::json!({"valid": true, "e164": "+14155550123"}),
            ),
            result(
                "numverify",
                true,
                serde_json::json!({"valid": true, "country": "US", "carrier": "AT&T", "line_type": "mobile"}),
            ),
        ];
        let summary = build_summary(QueryType::Phone, &results);
        assert_eq!(summary["valid"], true);
        assert_eq!(summary["formatted"], "+14155550123");
        assert_eq!(summary["carrier"], "AT&T");
        assert_eq!(summary["line_type"], "mobile");
    }

    #[test]
    fn phone_summary_ignores_not_found_sources() {
        let results = vec![
            result(
                "phone-structure",
                true,
                serde_json::json!({"valid": false}),
            ),
            result(
                "numverify",
                false,
                serde_json::json!({"carrier": "ShouldNotAppear"}),
            ),
        ];
        let summary = build_summary(QueryType::Phone, &results);
        assert_eq!(summary["valid"], false);
        assert_eq!(summary["carrier"], Value::Null);
    }

    #[test]
    fn username_summary_dedups_by_url() {
        let mut duplicate = social("twitter", true);
        duplicate.source = "social:twitter-2".to_owned();
        let results = vec![social("twitter", true), duplicate, social("github", true)];
        let summary = build_summary(QueryType::Username, &results);
        assert_eq!(summary["total_profiles"], 2);
    }

    #[test]
    fn profile_url_key_normalizes_equivalent_links() {
        assert_eq!(
            profile_url_key("https://GitHub.com/octocat/"),
            profile_url_key("https://github.com/octocat?tab=repos#readme")
        );
        assert_eq!(profile_url_key("not a url"), "not a url");
    }

    #[test]
    fn username_summary_includes_scanner_profiles() {
        let results = vec![
            social("twitter", true),
            result(
                "deep-scan",
                true,
                serde_json::json!({"profiles_found": 2, "profiles": [
                    {"site": "Mastodon", "url": "https://mastodon.social/@user"},
                    {"platform": "keybase", "url": "https://keybase.io/user"}
                ]}),
            ),
        ];
        let summary = build_summary(QueryType::Username, &results);
        assert_eq!(summary["total_profiles"], 3);
        let platforms = summary["platforms"].as_array().expect("platforms");
        assert!(platforms.contains(&Value::String("mastodon".into())));
        assert!(platforms.contains(&Value::String("keybase".into())));
    }

    #[test]
    fn name_summary_caps_cases_and_carries_manual_links() {
        let cases: Vec<Value> = (0..8)
            .map(|i| serde_json::json!({"case_name": format!("Case {i}")}))
            .collect();
        let results = vec![
            result(
                "courtlistener",
                true,
                serde_json::json!({"total_results": 8, "cases": cases}),
            ),
            result(
                "manual-links",
                true,
                serde_json::json!({"manual_search_links": [{"name": "Whitepages", "url": "https://example"}]}),
            ),
        ];
        let summary = build_summary(QueryType::Name, &results);
        assert_eq!(summary["legal_cases_found"], 8);
        assert_eq!(
            summary["legal_cases"].as_array().expect("cases").len(),
            MAX_LISTED_CASES
        );
        assert_eq!(
            summary["manual_search_links"]
                .as_array()
                .expect("links")
                .len(),
            1
        );
        assert_eq!(summary["people_profiles"].as_array().expect("people").len(), 0);
    }

    #[test]
    fn summaries_hold_no_unknown_provider_fields() {
        let results = vec![result(
            "leakcheck",
            true,
            serde_json::json!({"breaches_found": 1, "exotic_upstream_field": "x"}),
        )];
        let summary = build_summary(QueryType::Email, &results);
        assert!(summary.get("exotic_upstream_field").is_none());
    }

    #[test]
    fn recommendation_tracks_risk_buckets() {
        assert!(recommendation(100).starts_with("CRITICAL"));
        assert!(recommendation(60).starts_with("HIGH RISK"));
        assert!(recommendation(45).starts_with("MODERATE"));
        assert!(recommendation(30).starts_with("LOW RISK"));
        assert!(recommendation(0).starts_with("MINIMAL"));
    }
}
