//! Configuration management and validation.
//!
//! Provides configuration structures for sheet locations, messaging,
//! persistence and network behaviour, with layered loading from
//! defaults, an optional JSON file and command-line overrides.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_CATALOG_URL,
    DEFAULT_ENQUIRY_NUMBER, DEFAULT_GRAMS_PER_UNIT, DEFAULT_INITIAL_BACKOFF_MS,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BACKOFF_MS, DEFAULT_PRODUCTS_URL, DEFAULT_PROXY_PREFIX,
    DEFAULT_REVIEW_SUBMIT_URL, DEFAULT_REVIEWS_URL, DEFAULT_SHOP_NAME, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_WHATSAPP_NUMBER, SELECTIONS_FILE_NAME,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Retry schedule applied to every sheet fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Delay before the second attempt
    pub initial_backoff_ms: u64,

    /// Growth factor applied to the delay after each attempt
    pub backoff_multiplier: f64,

    /// Upper bound on any single delay
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            max_backoff_ms: DEFAULT_MAX_BACKOFF_MS,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay to wait after the given (1-based) failed attempt
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let delay = self.initial_backoff_ms as f64 * self.backoff_multiplier.powi(exponent);
        let capped = delay.min(self.max_backoff_ms as f64).max(0.0);
        Duration::from_millis(capped as u64)
    }
}

/// Network configuration for sheet fetches and submissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Retry schedule
    pub retry: RetryPolicy,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            retry: RetryPolicy::default(),
        }
    }
}

impl NetworkConfig {
    /// Per-request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Global configuration for the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Order-builder catalog sheet
    pub catalog_url: String,

    /// Store product sheet
    pub products_url: String,

    /// Review sheet
    pub reviews_url: String,

    /// Review submission endpoint
    pub review_submit_url: String,

    /// CORS proxy prefix used for the first review fetch tier
    pub proxy_prefix: String,

    /// Number receiving order hand-offs
    pub whatsapp_number: String,

    /// Number receiving product enquiries
    pub enquiry_number: String,

    /// Shop name printed in order summaries
    pub shop_name: String,

    /// Grams per order unit
    pub grams_per_unit: u32,

    /// Where the selection map is persisted
    pub selections_path: PathBuf,

    /// Network behaviour
    pub network: NetworkConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            products_url: DEFAULT_PRODUCTS_URL.to_string(),
            reviews_url: DEFAULT_REVIEWS_URL.to_string(),
            review_submit_url: DEFAULT_REVIEW_SUBMIT_URL.to_string(),
            proxy_prefix: DEFAULT_PROXY_PREFIX.to_string(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            enquiry_number: DEFAULT_ENQUIRY_NUMBER.to_string(),
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            grams_per_unit: DEFAULT_GRAMS_PER_UNIT,
            selections_path: default_selections_path(),
            network: NetworkConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Override the catalog sheet location
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    /// Override the product sheet location
    pub fn with_products_url(mut self, url: impl Into<String>) -> Self {
        self.products_url = url.into();
        self
    }

    /// Override the review sheet location
    pub fn with_reviews_url(mut self, url: impl Into<String>) -> Self {
        self.reviews_url = url.into();
        self
    }

    /// Override where selections are stored
    pub fn with_selections_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.selections_path = path.into();
        self
    }

    /// Override the retry schedule
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.network.retry = retry;
        self
    }

    /// Override the request timeout
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.network.timeout_seconds = seconds;
        self
    }

    /// Default location of the configuration file
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load configuration from a JSON file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::serialization(format!("Invalid config file {}", path.display()), e)
        })
    }

    /// Load configuration in layers: defaults, then an explicit or default file
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::configuration(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => {
                    debug!("Loading default config file {}", path.display());
                    Self::from_file(&path)?
                }
                _ => Self::default(),
            },
        };

        Ok(config)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("catalog_url", &self.catalog_url),
            ("products_url", &self.products_url),
            ("reviews_url", &self.reviews_url),
            ("review_submit_url", &self.review_submit_url),
        ];
        for (name, url) in urls {
            if url.trim().is_empty() {
                return Err(Error::configuration(format!("{} must not be empty", name)));
            }
        }

        if self.whatsapp_number.trim().is_empty() {
            return Err(Error::configuration("whatsapp_number must not be empty"));
        }

        if self.grams_per_unit == 0 {
            return Err(Error::configuration("grams_per_unit must be positive"));
        }

        if self.network.timeout_seconds == 0 {
            return Err(Error::configuration("timeout_seconds must be positive"));
        }

        let retry = &self.network.retry;
        if retry.max_attempts == 0 {
            return Err(Error::configuration("retry.max_attempts must be at least 1"));
        }
        if retry.backoff_multiplier < 1.0 {
            return Err(Error::configuration(
                "retry.backoff_multiplier must be at least 1.0",
            ));
        }

        Ok(())
    }
}

/// Default selection file under the platform data directory
fn default_selections_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(SELECTIONS_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = StorefrontConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grams_per_unit, 50);
        assert!(config.selections_path.ends_with("selections.json"));
    }

    #[test]
    fn test_backoff_schedule_grows_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            initial_backoff_ms: 100,
            backoff_multiplier: 3.0,
            max_backoff_ms: 500,
        };
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(300));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(10), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"shop_name": "Test Shop", "network": {{"retry": {{"max_attempts": 4}}}}}}"#
        )
        .unwrap();

        let config = StorefrontConfig::load_layered(Some(file.path())).unwrap();
        assert_eq!(config.shop_name, "Test Shop");
        assert_eq!(config.network.retry.max_attempts, 4);
        assert_eq!(config.network.retry.initial_backoff_ms, 500);
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = StorefrontConfig::load_layered(Some(Path::new("/nonexistent/config.json")));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_validation_rejects_zero_attempts() {
        let config = StorefrontConfig::default().with_retry(RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_url() {
        let config = StorefrontConfig::default().with_catalog_url("  ");
        assert!(config.validate().is_err());
    }
}
