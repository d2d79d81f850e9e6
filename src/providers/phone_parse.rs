//! Offline phone-structure probe.
//!
//! Parses a phone string into country code and national number without
//! any network call. As a pure structural parse it is always `found`;
//! "not found" is not a valid outcome. Validity (digit counts within
//! E.164 bounds) is reported inside the payload instead.
//!
//! The calling-code table is a deterministic longest-prefix match over
//! common 1–3 digit codes. Only structure is claimed, not conformance to
//! any national numbering plan.

use crate::error::LookupError;
use crate::provider::SourceProvider;
use crate::query::Query;
use crate::types::SourceResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

const SOURCE: &str = "phone-structure";

/// E.164 allows at most 15 digits including the country code.
const MAX_E164_DIGITS: usize = 15;
const MIN_NATIONAL_DIGITS: usize = 4;

/// Country calling codes, longest first so prefix matching is unambiguous.
const CALLING_CODES: &[(&str, &str)] = &[
    ("234", "NG"),
    ("353", "IE"),
    ("351", "PT"),
    ("358", "FI"),
    ("380", "UA"),
    ("420", "CZ"),
    ("852", "HK"),
    ("971", "AE"),
    ("972", "IL"),
    ("20", "EG"),
    ("27", "ZA"),
    ("30", "GR"),
    ("31", "NL"),
    ("32", "BE"),
    ("33", "FR"),
    ("34", "ES"),
    ("39", "IT"),
    ("41", "CH"),
    ("43", "AT"),
    ("44", "GB"),
    ("45", "DK"),
    ("46", "SE"),
    ("47", "NO"),
    ("48", "PL"),
    ("49", "DE"),
    ("52", "MX"),
    ("55", "BR"),
    ("61", "AU"),
    ("62", "ID"),
    ("63", "PH"),
    ("64", "NZ"),
    ("65", "SG"),
    ("81", "JP"),
    ("82", "KR"),
    ("84", "VN"),
    ("86", "CN"),
    ("90", "TR"),
    ("91", "IN"),
    ("92", "PK"),
    ("1", "US"),
    ("7", "RU"),
];

/// Default country codes for region hints, used when the number has no
/// leading `+`.
const REGION_CODES: &[(&str, &str)] = &[
    ("US", "1"),
    ("CA", "1"),
    ("GB", "44"),
    ("AU", "61"),
    ("DE", "49"),
    ("FR", "33"),
    ("IN", "91"),
    ("BR", "55"),
];

/// Deterministic phone-structure parser. No network, no credentials.
pub struct PhoneStructureProbe;

/// Structured parse outcome.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedPhone {
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub national_number: String,
    pub valid: bool,
}

/// Parse a raw phone string. `region` is an optional ISO country hint
/// applied only when the number carries no explicit `+` prefix.
pub(crate) fn parse_phone(raw: &str, region: Option<&str>) -> ParsedPhone {
    let international = raw.trim_start().starts_with('+');
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let (country_code, region_match, national) = if international {
        match CALLING_CODES
            .iter()
            .find(|(code, _)| digits.starts_with(code))
        {
            Some((code, reg)) => (
                Some((*code).to_owned()),
                Some((*reg).to_owned()),
                digits[code.len()..].to_owned(),
            ),
            None => (None, None, digits.clone()),
        }
    } else if let Some(hint) = region {
        let hint = hint.to_ascii_uppercase();
        match REGION_CODES.iter().find(|(reg, _)| *reg == hint) {
            Some((reg, code)) => (
                Some((*code).to_owned()),
                Some((*reg).to_owned()),
                digits.clone(),
            ),
            None => (None, None, digits.clone()),
        }
    } else {
        (None, None, digits.clone())
    };

    let total = country_code.as_deref().map_or(0, str::len) + national.len();
    let valid = national.len() >= MIN_NATIONAL_DIGITS
        && total <= MAX_E164_DIGITS
        && !digits.is_empty();

    ParsedPhone {
        country_code,
        region: region_match,
        national_number: national,
        valid,
    }
}

#[async_trait]
impl SourceProvider for PhoneStructureProbe {
    fn name(&self) -> &str {
        SOURCE
    }

    fn timeout(&self) -> Duration {
        // Pure computation; the deadline is a formality.
        Duration::from_secs(1)
    }

    async fn probe(&self, query: &Query) -> Result<SourceResult, LookupError> {
        let parsed = parse_phone(&query.raw, query.state.as_deref());

        let mut data = Map::new();
        data.insert("valid".to_owned(), Value::Bool(parsed.valid));
        data.insert(
            "national_number".to_owned(),
            Value::String(parsed.national_number.clone()),
        );
        if let Some(ref cc) = parsed.country_code {
            data.insert("country_code".to_owned(), Value::String(cc.clone()));
            data.insert(
                "e164".to_owned(),
                Value::String(format!("+{cc}{}", parsed.national_number)),
            );
            data.insert(
                "international".to_owned(),
                Value::String(format!("+{cc} {}", parsed.national_number)),
            );
        }
        if let Some(region) = parsed.region {
            data.insert("region".to_owned(), Value::String(region));
        }

        // A pure parse always yields a result.
        Ok(SourceResult::new(SOURCE, true, data))
    }
}
