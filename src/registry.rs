//! The source registry: fixed, ordered provider sets per query type.
//!
//! The applicable set depends only on the query type, the deep-scan flag,
//! and which credentials are configured — never on run-time data.
//! Credential-gated providers are skipped at construction when their key
//! is absent; a missing credential is configuration, not an error.

use crate::config::LookupConfig;
use crate::provider::SourceProvider;
use crate::providers::{
    BreachProbe, CourtRecordProbe, GithubProbe, GravatarProbe, ManualLinksProbe, NumverifyProbe,
    PeopleDataProbe, PhoneStructureProbe, Platform, ScannerProbe, SocialProbe, VeriphoneProbe,
};
use crate::query::QueryType;

/// Build the ordered provider sequence applicable to `query_type`.
///
/// Order is fixed per type and preserved in the output sequence. When
/// `deep_scan` is set, the slower process-backed scanner is appended for
/// types it covers (and only if a scanner command is configured).
pub fn providers_for(
    query_type: QueryType,
    deep_scan: bool,
    config: &LookupConfig,
) -> Vec<Box<dyn SourceProvider>> {
    let mut providers: Vec<Box<dyn SourceProvider>> = Vec::new();

    match query_type {
        QueryType::Email => {
            if let Some(ref key) = config.credentials.leakcheck {
                providers.push(Box::new(BreachProbe::new(key.clone(), config)));
            }
            providers.push(Box::new(GravatarProbe::new(config)));
            for &platform in Platform::all() {
                providers.push(Box::new(SocialProbe::new(platform, config)));
            }
            providers.push(Box::new(GithubProbe::new(config)));
        }
        QueryType::Phone => {
            providers.push(Box::new(PhoneStructureProbe));
            if let Some(ref key) = config.credentials.numverify {
                providers.push(Box::new(NumverifyProbe::new(key.clone(), config)));
            }
            if let Some(ref key) = config.credentials.veriphone {
                providers.push(Box::new(VeriphoneProbe::new(key.clone(), config)));
            }
        }
        QueryType::Username => {
            for &platform in Platform::all() {
                providers.push(Box::new(SocialProbe::new(platform, config)));
            }
            providers.push(Box::new(GithubProbe::new(config)));
        }
        QueryType::Name => {
            if let Some(ref key) = config.credentials.people_data {
                providers.push(Box::new(PeopleDataProbe::new(key.clone(), config)));
            }
            providers.push(Box::new(CourtRecordProbe::new(config)));
            providers.push(Box::new(ManualLinksProbe));
        }
    }

    if deep_scan && matches!(query_type, QueryType::Email | QueryType::Username) {
        if let Some(ref command) = config.scanner_command {
            providers.push(Box::new(ScannerProbe::new(command.clone(), config)));
        }
    }

    providers
}
