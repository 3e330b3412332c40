//! Configuration for feed sessions
//!
//! A feed is configured from YAML. Every field has a default, so an empty
//! document is a valid configuration.
//!
//! ```yaml
//! api:
//!   client_id: "your-access-key"
//! feed:
//!   kind: featured
//!   mode: random
//!   page_size: 10
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::types::{is_known_order, FeedKind, PagingMode, ORDER_LATEST, ORDERS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides `api.client_id`
pub const CLIENT_ID_ENV: &str = "UNSPLASH_CLIENT_ID";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete feed configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Session settings
    #[serde(default)]
    pub feed: FeedSettings,

    /// Item totals used for random page sampling
    #[serde(default)]
    pub categories: CategoryTotals,

    /// User-visible feedback strings
    #[serde(default)]
    pub messages: FeedbackMessages,
}

impl FeedConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::invalid_value("api.base_url", "cannot be empty"));
        }
        url::Url::parse(&self.api.base_url)?;

        if self.feed.page_size == 0 {
            return Err(Error::invalid_value(
                "feed.page_size",
                "must be greater than zero",
            ));
        }

        if !is_known_order(&self.feed.order) {
            return Err(Error::invalid_value(
                "feed.order",
                format!(
                    "unknown order '{}', expected one of: {}",
                    self.feed.order,
                    ORDERS.join(", ")
                ),
            ));
        }

        if self.categories.new_total == 0 {
            return Err(Error::invalid_value(
                "categories.new_total",
                "must be greater than zero",
            ));
        }
        if self.categories.featured_total == 0 {
            return Err(Error::invalid_value(
                "categories.featured_total",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Apply environment overrides
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(client_id) = std::env::var(CLIENT_ID_ENV) {
            if !client_id.is_empty() {
                self.api.client_id = Some(client_id);
            }
        }
        self
    }
}

// ============================================================================
// API
// ============================================================================

/// Remote API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access key sent as `client_id`
    #[serde(default)]
    pub client_id: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum retries per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Client-side rate limit
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

impl ApiConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.unsplash.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_requests_per_second() -> u32 {
    10
}

// ============================================================================
// Feed
// ============================================================================

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSettings {
    #[serde(default)]
    pub kind: FeedKind,

    #[serde(default)]
    pub mode: PagingMode,

    /// Server sort key, ignored in random mode
    #[serde(default = "default_order")]
    pub order: String,

    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            kind: FeedKind::default(),
            mode: PagingMode::default(),
            order: default_order(),
            page_size: default_page_size(),
        }
    }
}

fn default_order() -> String {
    ORDER_LATEST.to_string()
}

fn default_page_size() -> u32 {
    10
}

/// Known item totals per feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    #[serde(default = "default_new_total")]
    pub new_total: u32,

    #[serde(default = "default_featured_total")]
    pub featured_total: u32,
}

impl CategoryTotals {
    /// Total item count for a feed
    pub fn total_for(&self, feed: FeedKind) -> u32 {
        match feed {
            FeedKind::New => self.new_total,
            FeedKind::Featured => self.featured_total,
        }
    }
}

impl Default for CategoryTotals {
    fn default() -> Self {
        Self {
            new_total: default_new_total(),
            featured_total: default_featured_total(),
        }
    }
}

fn default_new_total() -> u32 {
    40_000
}

fn default_featured_total() -> u32 {
    1_400
}

// ============================================================================
// Feedback
// ============================================================================

/// Feedback strings passed to the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackMessages {
    /// Shown when a fetch leaves the list empty
    #[serde(default = "default_load_nothing")]
    pub load_nothing: String,

    /// Prefix of the message shown when a fetch fails
    #[serde(default = "default_load_failed")]
    pub load_failed: String,
}

impl Default for FeedbackMessages {
    fn default() -> Self {
        Self {
            load_nothing: default_load_nothing(),
            load_failed: default_load_failed(),
        }
    }
}

fn default_load_nothing() -> String {
    "Nothing to load".to_string()
}

fn default_load_failed() -> String {
    "Failed to load".to_string()
}

// ============================================================================
// Loading
// ============================================================================

/// Load a feed configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<FeedConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    load_config_from_str(&content)
}

/// Load a feed configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<FeedConfig> {
    // serde_yaml rejects an empty document, treat it as all-defaults
    let config: FeedConfig = if yaml.trim().is_empty() {
        FeedConfig::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.api.base_url, "https://api.unsplash.com");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.feed.page_size, 10);
        assert_eq!(config.feed.order, "latest");
        assert_eq!(config.feed.mode, PagingMode::Sequential);
        assert_eq!(config.categories.total_for(FeedKind::Featured), 1_400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, FeedConfig::default());
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
api:
  client_id: "abc123"
  max_retries: 1
feed:
  kind: featured
  mode: random
  page_size: 30
messages:
  load_nothing: "Empty"
"#;
        let config = load_config_from_str(yaml).unwrap();
        assert_eq!(config.api.client_id.as_deref(), Some("abc123"));
        assert_eq!(config.api.max_retries, 1);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.feed.kind, FeedKind::Featured);
        assert_eq!(config.feed.mode, PagingMode::Random);
        assert_eq!(config.feed.page_size, 30);
        assert_eq!(config.messages.load_nothing, "Empty");
        assert_eq!(config.messages.load_failed, "Failed to load");
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = load_config_from_str("feed:\n  page_size: 0\n").unwrap_err();
        assert!(err.to_string().contains("feed.page_size"));
    }

    #[test]
    fn test_rejects_unknown_order() {
        let err = load_config_from_str("feed:\n  order: views\n").unwrap_err();
        assert!(err.to_string().contains("unknown order 'views'"));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(load_config_from_str("api:\n  base_url: \"\"\n").is_err());
        let err = load_config_from_str("api:\n  base_url: not a url\n").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_zero_totals() {
        let err = load_config_from_str("categories:\n  featured_total: 0\n").unwrap_err();
        assert!(err.to_string().contains("categories.featured_total"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = load_config_from_str("feed: [unclosed").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
        assert!(err.to_string().starts_with("Failed to parse YAML"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "feed:\n  kind: featured\n  order: popular").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.feed.kind, FeedKind::Featured);
        assert_eq!(config.feed.order, "popular");
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::Other(_)));
        assert!(err.to_string().contains("Failed to read config file"));
        assert!(err.to_string().contains("IO error"));
    }
}
