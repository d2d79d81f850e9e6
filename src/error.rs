//! Error types for the footprint crate.
//!
//! All errors carry stable string messages suitable for display and
//! programmatic handling. No API keys or credential material appear in
//! error messages.

/// Errors that can occur during a footprint lookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The raw query is structurally invalid for its declared type.
    /// Surfaced to the caller as a 400 with the reason verbatim.
    #[error("{0}")]
    InvalidQuery(String),

    /// An HTTP request to an upstream source failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse an upstream response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A provider requires an API credential that is not configured.
    /// Providers in this state are skipped at registry construction;
    /// this variant only appears if a probe is invoked directly.
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// A probe exceeded its deadline.
    #[error("probe timed out: {0}")]
    Timeout(String),

    /// Invalid lookup configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for footprint results.
pub type Result<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_query_is_verbatim() {
        let err = LookupError::InvalidQuery("Invalid email format".into());
        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[test]
    fn display_http() {
        let err = LookupError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = LookupError::Parse("unexpected response shape".into());
        assert_eq!(err.to_string(), "parse error: unexpected response shape");
    }

    #[test]
    fn display_missing_credential() {
        let err = LookupError::MissingCredential("leakcheck".into());
        assert_eq!(err.to_string(), "missing credential: leakcheck");
    }

    #[test]
    fn display_timeout() {
        let err = LookupError::Timeout("exceeded 10s deadline".into());
        assert_eq!(err.to_string(), "probe timed out: exceeded 10s deadline");
    }

    #[test]
    fn display_config() {
        let err = LookupError::Config("timeout_seconds must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: timeout_seconds must be greater than 0"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LookupError>();
    }
}
