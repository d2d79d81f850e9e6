//! Query classification and validation.
//!
//! Every lookup starts here: the raw string is tagged with a
//! [`QueryType`] (explicit hint or auto-detected) and validated before any
//! network call happens. Classification is pure and idempotent; rejection
//! is reported to the caller, never retried.

use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four supported identity fragment types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Email,
    Phone,
    Username,
    Name,
}

impl QueryType {
    /// Wire name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Username => "username",
            Self::Name => "name",
        }
    }

    /// All variants, in a stable order.
    pub fn all() -> &'static [QueryType] {
        &[Self::Email, Self::Phone, Self::Username, Self::Name]
    }

    /// Parse a wire name. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "username" => Some(Self::Username),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified, validated query. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Query {
    /// The trimmed raw input.
    pub raw: String,
    /// The classified type.
    pub query_type: QueryType,
    /// Auxiliary attribute: region for name searches (e.g. "CA"), default
    /// country for phone parsing.
    pub state: Option<String>,
    /// Widens the provider set to include slower/heavier sources.
    pub deep_scan: bool,
}

impl Query {
    /// Classify and validate a raw input string.
    ///
    /// An explicit `hint` wins over auto-detection. Validation is
    /// type-specific: email requires an `@`, name requires an interior
    /// space, phone and username accept any non-empty string (further
    /// normalization happens inside their providers).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidQuery`] with a human-readable reason
    /// when the input is structurally invalid for its type.
    pub fn classify(
        raw: &str,
        hint: Option<QueryType>,
        state: Option<String>,
        deep_scan: bool,
    ) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LookupError::InvalidQuery("Query must not be empty".into()));
        }

        let query_type = hint.unwrap_or_else(|| detect_type(trimmed));

        match query_type {
            QueryType::Email => {
                if !trimmed.contains('@') {
                    return Err(LookupError::InvalidQuery("Invalid email format".into()));
                }
            }
            QueryType::Name => {
                if !trimmed.trim_matches(' ').contains(' ') {
                    return Err(LookupError::InvalidQuery(
                        "Please provide first and last name".into(),
                    ));
                }
            }
            QueryType::Phone | QueryType::Username => {}
        }

        Ok(Self {
            raw: trimmed.to_owned(),
            query_type,
            state: state.filter(|s| !s.trim().is_empty()),
            deep_scan,
        })
    }

    /// First/last split for name queries: first word, remainder as last
    /// name. Only meaningful for [`QueryType::Name`].
    pub fn name_parts(&self) -> (&str, &str) {
        match self.raw.split_once(' ') {
            Some((first, last)) => (first, last.trim_start()),
            None => (self.raw.as_str(), ""),
        }
    }

    /// Local part of an email query, used to probe social platforms and
    /// code hosting with the email's username.
    pub fn email_local_part(&self) -> &str {
        self.raw.split('@').next().unwrap_or(self.raw.as_str())
    }
}

/// Auto-detect a query type when the caller gave no hint.
///
/// Rules, in priority order: an `@` means email; a string of digits,
/// spaces, and `+ - ( )` with at least 10 digits means phone; an interior
/// space means name; anything else is a username.
fn detect_type(raw: &str) -> QueryType {
    if raw.contains('@') {
        return QueryType::Email;
    }
    let phone_shaped = raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    if phone_shaped && digits >= 10 {
        return QueryType::Phone;
    }
    if raw.contains(' ') {
        return QueryType::Name;
    }
    QueryType::Username
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_requires_at_sign() {
        let err = Query::classify("not-an-email", Some(QueryType::Email), None, false)
            .expect_err("should reject");
        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[test]
    fn valid_email_accepted() {
        let query = Query::classify("a@b.com", Some(QueryType::Email), None, false)
            .expect("should accept");
        assert_eq!(query.query_type, QueryType::Email);
        assert_eq!(query.raw, "a@b.com");
    }

    #[test]
    fn name_requires_interior_space() {
        let err =
            Query::classify("John", Some(QueryType::Name), None, false).expect_err("should reject");
        assert_eq!(err.to_string(), "Please provide first and last name");
    }

    #[test]
    fn name_split_on_first_space() {
        let query = Query::classify("John van Doe", Some(QueryType::Name), None, false)
            .expect("should accept");
        assert_eq!(query.name_parts(), ("John", "van Doe"));
    }

    #[test]
    fn empty_input_rejected_for_every_type() {
        for &t in QueryType::all() {
            assert!(Query::classify("   ", Some(t), None, false).is_err());
        }
    }

    #[test]
    fn phone_and_username_accept_any_non_empty() {
        assert!(Query::classify("x", Some(QueryType::Username), None, false).is_ok());
        assert!(Query::classify("abc", Some(QueryType::Phone), None, false).is_ok());
    }

    #[test]
    fn detection_email_wins() {
        assert_eq!(detect_type("user@example.com"), QueryType::Email);
    }

    #[test]
    fn detection_phone_needs_ten_digits() {
        assert_eq!(detect_type("+1 (415) 555-0123"), QueryType::Phone);
        assert_eq!(detect_type("555-0123"), QueryType::Username);
    }

    #[test]
    fn detection_space_means_name() {
        assert_eq!(detect_type("John Doe"), QueryType::Name);
    }

    #[test]
    fn detection_fallback_is_username() {
        assert_eq!(detect_type("octocat"), QueryType::Username);
    }

    #[test]
    fn classification_is_idempotent() {
        for raw in ["user@example.com", "+14155550123", "octocat", "John Doe"] {
            let a = Query::classify(raw, None, None, false).expect("accept");
            let b = Query::classify(raw, None, None, false).expect("accept");
            assert_eq!(a.query_type, b.query_type);
            assert_eq!(a.raw, b.raw);
        }
        let first = Query::classify("not-an-email", Some(QueryType::Email), None, false);
        let second = Query::classify("not-an-email", Some(QueryType::Email), None, false);
        assert!(first.is_err() && second.is_err());
    }

    #[test]
    fn blank_state_dropped() {
        let query = Query::classify("John Doe", Some(QueryType::Name), Some("  ".into()), false)
            .expect("accept");
        assert!(query.state.is_none());
    }

    #[test]
    fn email_local_part_extraction() {
        let query =
            Query::classify("octocat@example.com", None, None, false).expect("accept");
        assert_eq!(query.email_local_part(), "octocat");
    }

    #[test]
    fn query_type_parse_and_display() {
        assert_eq!(QueryType::parse("EMAIL"), Some(QueryType::Email));
        assert_eq!(QueryType::parse("bogus"), None);
        assert_eq!(QueryType::Phone.to_string(), "phone");
    }
}
