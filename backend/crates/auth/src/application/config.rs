//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared behind an `Arc`; nothing here is read again per request.

use std::time::Duration;

use thiserror::Error;

/// Minimum HS256 key length in bytes (256 bits)
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

pub const ENV_JWT_KEY: &str = "JWT_KEY";
pub const ENV_ACCESS_TOKEN_LIFETIME_MINUTES: &str = "JWT_ACCESS_TOKEN_LIFETIME_MINUTES";
pub const ENV_REFRESH_TOKEN_LIFETIME_DAYS: &str = "JWT_REFRESH_TOKEN_LIFETIME_DAYS";
pub const ENV_SESSION_CLEANUP_INTERVAL_SECS: &str = "SESSION_CLEANUP_INTERVAL_SECS";

/// Upper bound for the access token lifetime (one year)
pub const MAX_ACCESS_TOKEN_LIFETIME_MINUTES: u64 = 525_600;
/// Upper bound for the refresh session lifetime (ten years)
pub const MAX_REFRESH_TOKEN_LIFETIME_DAYS: u64 = 3_650;

/// Startup configuration errors. All of them are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{0} must be at least 32 bytes")]
    SigningKeyTooShort(&'static str),

    #[error("{key} must be a positive integer within range (got {value:?})")]
    InvalidNumber { key: &'static str, value: String },
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key for access tokens
    pub signing_key: Vec<u8>,
    /// Access token lifetime (1 hour)
    pub access_token_ttl: Duration,
    /// Refresh session lifetime in whole days (30)
    pub refresh_token_lifetime_days: u32,
    /// Random bytes per refresh token (hex-encoded to twice the length)
    pub refresh_token_bytes: usize,
    /// Interval of the background expired-session sweep; `None` disables it
    pub session_cleanup_interval: Option<Duration>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_key", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_lifetime_days", &self.refresh_token_lifetime_days)
            .field("refresh_token_bytes", &self.refresh_token_bytes)
            .field("session_cleanup_interval", &self.session_cleanup_interval)
            .finish()
    }
}

impl AuthConfig {
    pub const DEFAULT_ACCESS_TOKEN_MINUTES: u64 = 60;
    pub const DEFAULT_REFRESH_TOKEN_LIFETIME_DAYS: u32 = 30;
    pub const DEFAULT_REFRESH_TOKEN_BYTES: usize = 20;

    /// Create config with the reference defaults and the given signing key
    pub fn new(signing_key: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let signing_key = signing_key.into();
        if signing_key.is_empty() {
            return Err(ConfigError::Missing(ENV_JWT_KEY));
        }
        if signing_key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(ConfigError::SigningKeyTooShort(ENV_JWT_KEY));
        }

        Ok(Self {
            signing_key,
            access_token_ttl: Duration::from_secs(Self::DEFAULT_ACCESS_TOKEN_MINUTES * 60),
            refresh_token_lifetime_days: Self::DEFAULT_REFRESH_TOKEN_LIFETIME_DAYS,
            refresh_token_bytes: Self::DEFAULT_REFRESH_TOKEN_BYTES,
            session_cleanup_interval: None,
        })
    }

    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    ///
    /// Unset optional values fall back to defaults; set-but-invalid values are
    /// errors rather than silently defaulted.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup(ENV_JWT_KEY).ok_or(ConfigError::Missing(ENV_JWT_KEY))?;
        let mut config = Self::new(key.into_bytes())?;

        if let Some(minutes) = parse_positive(
            &lookup,
            ENV_ACCESS_TOKEN_LIFETIME_MINUTES,
            MAX_ACCESS_TOKEN_LIFETIME_MINUTES,
        )? {
            config.access_token_ttl = Duration::from_secs(minutes * 60);
        }

        if let Some(days) = parse_positive(
            &lookup,
            ENV_REFRESH_TOKEN_LIFETIME_DAYS,
            MAX_REFRESH_TOKEN_LIFETIME_DAYS,
        )? {
            config.refresh_token_lifetime_days =
                u32::try_from(days).map_err(|_| ConfigError::InvalidNumber {
                    key: ENV_REFRESH_TOKEN_LIFETIME_DAYS,
                    value: days.to_string(),
                })?;
        }

        // 0 explicitly disables the sweep
        if let Some(raw) = lookup(ENV_SESSION_CLEANUP_INTERVAL_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: ENV_SESSION_CLEANUP_INTERVAL_SECS,
                    value: raw.clone(),
                })?;
            config.session_cleanup_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Refresh session lifetime as a chrono duration
    pub fn refresh_token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.refresh_token_lifetime_days))
    }

    /// Access token lifetime in whole seconds
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl.as_secs() as i64
    }
}

/// Parse an optional value in `1..=max`
fn parse_positive<F>(lookup: &F, key: &'static str, max: u64) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if (1..=max).contains(&value) => Ok(Some(value)),
        _ => Err(ConfigError::InvalidNumber { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::from_lookup(lookup(&[(ENV_JWT_KEY, KEY)])).unwrap();
        assert_eq!(config.access_token_ttl, Duration::from_secs(3600));
        assert_eq!(config.refresh_token_lifetime_days, 30);
        assert_eq!(config.refresh_token_bytes, 20);
        assert!(config.session_cleanup_interval.is_none());
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let err = AuthConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(ENV_JWT_KEY));
    }

    #[test]
    fn test_short_key_is_rejected() {
        let err = AuthConfig::from_lookup(lookup(&[(ENV_JWT_KEY, "short")])).unwrap_err();
        assert_eq!(err, ConfigError::SigningKeyTooShort(ENV_JWT_KEY));
    }

    #[test]
    fn test_overrides() {
        let config = AuthConfig::from_lookup(lookup(&[
            (ENV_JWT_KEY, KEY),
            (ENV_ACCESS_TOKEN_LIFETIME_MINUTES, "15"),
            (ENV_REFRESH_TOKEN_LIFETIME_DAYS, "7"),
            (ENV_SESSION_CLEANUP_INTERVAL_SECS, "600"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_ttl_secs(), 900);
        assert_eq!(config.refresh_token_lifetime(), chrono::Duration::days(7));
        assert_eq!(config.session_cleanup_interval, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_invalid_lifetime_is_fatal() {
        for bad in ["abc", "0", "-3", ""] {
            let err = AuthConfig::from_lookup(lookup(&[
                (ENV_JWT_KEY, KEY),
                (ENV_REFRESH_TOKEN_LIFETIME_DAYS, bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidNumber { .. }), "{bad}");
        }
    }

    #[test]
    fn test_oversized_lifetimes_are_rejected() {
        for key in [ENV_ACCESS_TOKEN_LIFETIME_MINUTES, ENV_REFRESH_TOKEN_LIFETIME_DAYS] {
            for huge in ["18446744073709551615", "200000000"] {
                let err = AuthConfig::from_lookup(lookup(&[(ENV_JWT_KEY, KEY), (key, huge)]))
                    .unwrap_err();
                assert_eq!(
                    err,
                    ConfigError::InvalidNumber {
                        key,
                        value: huge.to_string()
                    }
                );
            }
        }
    }

    #[test]
    fn test_lifetime_upper_bounds_are_inclusive() {
        let config = AuthConfig::from_lookup(lookup(&[
            (ENV_JWT_KEY, KEY),
            (ENV_ACCESS_TOKEN_LIFETIME_MINUTES, "525600"),
            (ENV_REFRESH_TOKEN_LIFETIME_DAYS, "3650"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_ttl_secs(), 525_600 * 60);
        assert_eq!(config.refresh_token_lifetime(), chrono::Duration::days(3650));
    }

    #[test]
    fn test_zero_cleanup_interval_disables_sweep() {
        let config = AuthConfig::from_lookup(lookup(&[
            (ENV_JWT_KEY, KEY),
            (ENV_SESSION_CLEANUP_INTERVAL_SECS, "0"),
        ]))
        .unwrap();
        assert!(config.session_cleanup_interval.is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AuthConfig::new(KEY).unwrap();
        assert!(!format!("{config:?}").contains(KEY));
    }
}
