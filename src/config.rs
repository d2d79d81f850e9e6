//! Lookup configuration with sensible defaults.
//!
//! [`LookupConfig`] controls probe timeouts, request behaviour, and the
//! optional API credentials that gate some providers. Credentials are read
//! from the environment once, at construction time, and passed explicitly
//! into the registry; an absent credential is never an error, it just
//! means the gated provider is not constructed.

use crate::error::{LookupError, Result};

/// Optional upstream API credentials. Every field is optional; absence
/// disables the corresponding provider rather than failing anything.
#[derive(Debug, Clone, Default)]
pub struct ApiCredentials {
    /// LeakCheck breach-index key (`LEAKCHECK_API_KEY`).
    pub leakcheck: Option<String>,
    /// Numverify phone-validation key (`NUMVERIFY_API_KEY`).
    pub numverify: Option<String>,
    /// Veriphone phone-validation key (`VERIPHONE_API_KEY`).
    pub veriphone: Option<String>,
    /// People Data Labs person-search key (`PDL_API_KEY`).
    pub people_data: Option<String>,
}

impl ApiCredentials {
    /// Read credentials from the environment. Unset and blank variables
    /// both count as absent.
    pub fn from_env() -> Self {
        Self {
            leakcheck: env_nonempty("LEAKCHECK_API_KEY"),
            numverify: env_nonempty("NUMVERIFY_API_KEY"),
            veriphone: env_nonempty("VERIPHONE_API_KEY"),
            people_data: env_nonempty("PDL_API_KEY"),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Configuration for a lookup request.
///
/// Use [`Default::default()`] for credential-free defaults, or
/// [`LookupConfig::from_env()`] to pick up API keys and the scanner
/// command from the environment.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Per-probe HTTP deadline in seconds.
    pub timeout_seconds: u64,
    /// Elevated deadline for process-backed deep-scan providers, in
    /// seconds. On expiry the process is killed and a fallback result
    /// substituted.
    pub deep_timeout_seconds: u64,
    /// Custom User-Agent. If `None`, rotates through a built-in list of
    /// realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Upstream API credentials.
    pub credentials: ApiCredentials,
    /// External deep-scan command (`FOOTPRINT_SCANNER_CMD`). Unset means
    /// the scanner provider is not constructed even when deep scan is
    /// requested.
    pub scanner_command: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            deep_timeout_seconds: 120,
            user_agent: None,
            credentials: ApiCredentials::default(),
            scanner_command: None,
        }
    }
}

impl LookupConfig {
    /// Build a config from environment variables, with defaults for
    /// everything not set.
    pub fn from_env() -> Self {
        Self {
            credentials: ApiCredentials::from_env(),
            scanner_command: env_nonempty("FOOTPRINT_SCANNER_CMD"),
            ..Self::default()
        }
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `deep_timeout_seconds` must be at least `timeout_seconds`
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(LookupError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.deep_timeout_seconds < self.timeout_seconds {
            return Err(LookupError::Config(
                "deep_timeout_seconds must be at least timeout_seconds".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = LookupConfig::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.deep_timeout_seconds, 120);
        assert!(config.user_agent.is_none());
        assert!(config.scanner_command.is_none());
        assert!(config.credentials.leakcheck.is_none());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(LookupConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = LookupConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn deep_timeout_below_probe_timeout_rejected() {
        let config = LookupConfig {
            timeout_seconds: 30,
            deep_timeout_seconds: 5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("deep_timeout_seconds"));
    }

    #[test]
    fn default_credentials_all_absent() {
        let creds = ApiCredentials::default();
        assert!(creds.leakcheck.is_none());
        assert!(creds.numverify.is_none());
        assert!(creds.veriphone.is_none());
        assert!(creds.people_data.is_none());
    }
}
