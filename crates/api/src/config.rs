//! API client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `COPPERLEAF_API_BASE_URL` - Base URL of the Copperleaf REST API
//!
//! ## Optional
//! - `COPPERLEAF_API_TIMEOUT_SECS` - Request timeout (default: 30)
//! - `COPPERLEAF_CACHE_CAPACITY` - Max cached query entries (default: 1000)
//! - `COPPERLEAF_CACHE_TTL_SECS` - Cached entry time-to-live (default: 300)
//! - `COPPERLEAF_SERVICE_TOKEN` - Service credential for admin tooling
//!   (validated against placeholder patterns and minimum entropy)

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const ENV_BASE_URL: &str = "COPPERLEAF_API_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "COPPERLEAF_API_TIMEOUT_SECS";
const ENV_CACHE_CAPACITY: &str = "COPPERLEAF_CACHE_CAPACITY";
const ENV_CACHE_TTL_SECS: &str = "COPPERLEAF_CACHE_TTL_SECS";
const ENV_SERVICE_TOKEN: &str = "COPPERLEAF_SERVICE_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_CAPACITY: u64 = 1000;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "token-here",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the Copperleaf REST API
    pub base_url: Url,
    /// Timeout applied to every outbound request
    pub request_timeout: Duration,
    /// Maximum number of cached query entries
    pub cache_capacity: u64,
    /// Time-to-live for cached query entries
    pub cache_ttl: Duration,
    /// Service credential for admin tooling (bearer token)
    pub service_token: Option<SecretString>,
}

impl ApiConfig {
    /// Create a configuration with defaults for everything but the base URL.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            service_token: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the service token fails validation (placeholder detection, entropy
    /// check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_required_env(ENV_BASE_URL)?)?;
        let request_timeout =
            Duration::from_secs(parse_env_or(ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?);
        let cache_capacity = parse_env_or(ENV_CACHE_CAPACITY, DEFAULT_CACHE_CAPACITY)?;
        let cache_ttl =
            Duration::from_secs(parse_env_or(ENV_CACHE_TTL_SECS, DEFAULT_CACHE_TTL_SECS)?);

        let service_token = match get_optional_env(ENV_SERVICE_TOKEN) {
            Some(value) => {
                validate_secret_strength(&value, ENV_SERVICE_TOKEN)?;
                Some(SecretString::from(value))
            }
            None => None,
        };

        Ok(Self {
            base_url,
            request_timeout,
            cache_capacity,
            cache_ttl,
            service_token,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse an environment variable as `u64`, falling back to a default.
fn parse_env_or(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Parse and sanity-check the API base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(ENV_BASE_URL.to_string(), e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            ENV_BASE_URL.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            ENV_BASE_URL.to_string(),
            "missing host".to_string(),
        ));
    }

    Ok(url)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated token."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_valid() {
        let url = parse_base_url("https://api.copperleaf.shop/v1").unwrap();
        assert_eq!(url.host_str(), Some("api.copperleaf.shop"));
    }

    #[test]
    fn test_parse_base_url_bad_scheme() {
        let result = parse_base_url("ftp://api.copperleaf.shop");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_base_url_garbage() {
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_shannon_entropy_degenerate() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // 50% a, 50% b = 1 bit per char
        assert!((shannon_entropy("abab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_placeholder() {
        let result = validate_secret_strength("your-token-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_new_defaults() {
        let config = ApiConfig::new(Url::parse("https://api.copperleaf.shop").unwrap());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.cache_capacity, 1000);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert!(config.service_token.is_none());
    }
}
