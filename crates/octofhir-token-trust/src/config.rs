//! Token trust configuration.
//!
//! Controls how the validator behaves, how long status lookups are cached,
//! and which audit events are emitted.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root token trust configuration.
///
/// # Example (TOML)
///
/// ```toml
/// [validation]
/// short_circuit_identity_errors = false
/// cache_status_lookups = false
///
/// [cache]
/// ttl = "5m"
///
/// [audit]
/// raise_success_events = true
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Validator behavior.
    pub validation: ValidationConfig,

    /// Status lookup cache.
    pub cache: CacheConfig,

    /// Audit event emission.
    pub audit: AuditConfig,
}

/// Validator behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Skip identity token re-validation when the verdict already failed.
    ///
    /// Access tokens always skip re-validation in that case. Identity tokens
    /// historically did not; leave this off to keep that behavior.
    pub short_circuit_identity_errors: bool,

    /// Wrap the subject and client providers in caching decorators.
    ///
    /// Off by default: with caching on, a revocation goes unnoticed until the
    /// cached status expires.
    pub cache_status_lookups: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            short_circuit_identity_errors: false,
            cache_status_lookups: false,
        }
    }
}

impl ValidationConfig {
    /// Checks that `cache` is usable for the status lookups this enables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if status caching is enabled with a
    /// zero TTL.
    pub fn validate_cache(&self, cache: &CacheConfig) -> Result<(), ConfigError> {
        if self.cache_status_lookups && cache.ttl.is_zero() {
            return Err(ConfigError::InvalidValue(
                "cache ttl must be > 0 when cache_status_lookups is enabled".to_string(),
            ));
        }

        Ok(())
    }
}

/// Status lookup cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a cached subject or client status is trusted.
    /// Revocations become visible at most this long after they happen.
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300), // 5 minutes
        }
    }
}

/// Audit event configuration.
///
/// Controls which event types the tracing sink emits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Emit success events.
    pub raise_success_events: bool,

    /// Emit failure events.
    pub raise_failure_events: bool,

    /// Emit information events.
    pub raise_information_events: bool,

    /// Emit error events.
    pub raise_error_events: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            raise_success_events: true,
            raise_failure_events: true,
            raise_information_events: true,
            raise_error_events: true,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// The configuration document could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

impl TrustConfig {
    /// Parses and validates a TOML document.
    ///
    /// Missing sections and fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and any error from
    /// [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if status caching is enabled with a
    /// zero TTL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validation.validate_cache(&self.cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrustConfig::default();
        assert!(!config.validation.short_circuit_identity_errors);
        assert!(!config.validation.cache_status_lookups);
        assert_eq!(config.cache.ttl, Duration::from_secs(300));
        assert!(config.audit.raise_success_events);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(TrustConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_fails_validation() {
        let mut config = TrustConfig::default();
        config.validation.cache_status_lookups = true;
        config.cache.ttl = Duration::ZERO;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
        assert!(err.to_string().contains("ttl"));
    }

    #[test]
    fn test_zero_ttl_allowed_without_caching() {
        let mut config = TrustConfig::default();
        config.cache.ttl = Duration::ZERO;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = TrustConfig::from_toml_str(
            r#"
            [validation]
            short_circuit_identity_errors = true
            cache_status_lookups = true

            [cache]
            ttl = "30s"

            [audit]
            raise_information_events = false
            "#,
        )
        .unwrap();

        assert!(config.validation.short_circuit_identity_errors);
        assert!(config.validation.cache_status_lookups);
        assert_eq!(config.cache.ttl, Duration::from_secs(30));
        assert!(!config.audit.raise_information_events);
        assert!(config.audit.raise_failure_events);
    }

    #[test]
    fn test_from_empty_toml_uses_defaults() {
        let config = TrustConfig::from_toml_str("").unwrap();
        assert_eq!(config.cache.ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_malformed_toml() {
        let err = TrustConfig::from_toml_str("[cache\nttl = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_toml_ttl() {
        let err = TrustConfig::from_toml_str(
            "[validation]\ncache_status_lookups = true\n[cache]\nttl = \"0s\"",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_zero_ttl_accepted_when_caching_is_off() {
        let config = TrustConfig::from_toml_str("[cache]\nttl = \"0s\"").unwrap();
        assert!(config.cache.ttl.is_zero());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue("test error".to_string());
        assert_eq!(err.to_string(), "Invalid configuration value: test error");

        let err = ConfigError::Parse("expected `]`".to_string());
        assert_eq!(err.to_string(), "Failed to parse configuration: expected `]`");
    }
}
