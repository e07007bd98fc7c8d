//! Configuration and constants for the CLI.

use super::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Number of most common journeys reported by default
pub const DEFAULT_TOP_JOURNEYS: usize = 10;

/// Number of purchase paths reported by default
pub const DEFAULT_TOP_PATHS: usize = 20;

/// Number of loyal users reported by default
pub const DEFAULT_TOP_USERS: usize = 20;

/// Number of cart products reported by default
pub const DEFAULT_TOP_PRODUCTS: usize = 10;

/// Upper bound for any top-N setting
pub const MAX_TOP_N: usize = 1000;

/// Separator between page types in a purchase path string
pub const PATH_DELIMITER: &str = " -> ";

/// Polynomial degree used for duration trend lines
pub const TREND_DEGREE: usize = 3;

// Columns the loader insists on. `product` is optional.
pub const REQUIRED_COLUMNS: &[&str] = &["user", "session", "event_date", "page_type", "event_type"];

// Naive timestamp layouts tried in order before falling back to RFC 3339
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only layout (interpreted as midnight)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Labels driving the funnel predicates and report sizes.
///
/// Page types are an open category, so the sets used by the funnel
/// stages are configurable rather than baked in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Page types that count as "Browse Products"
    pub browse_pages: Vec<String>,

    /// Page type that counts as "View Product Details"
    pub product_page: String,

    /// Event type that counts as "Add to Cart"
    pub add_to_cart_event: String,

    /// Event type that counts as "Purchase"
    pub order_event: String,

    pub top_journeys: usize,
    pub top_paths: usize,
    pub top_users: usize,
    pub top_products: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            browse_pages: vec![
                "search_listing_page".to_string(),
                "listing_page".to_string(),
            ],
            product_page: "product_page".to_string(),
            add_to_cart_event: "add_to_cart".to_string(),
            order_event: "order".to_string(),
            top_journeys: DEFAULT_TOP_JOURNEYS,
            top_paths: DEFAULT_TOP_PATHS,
            top_users: DEFAULT_TOP_USERS,
            top_products: DEFAULT_TOP_PRODUCTS,
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading analytics config from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let config: AnalyticsConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every label is usable and every top-N is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.browse_pages.is_empty() {
            return Err(ConfigError::Invalid("browse_pages cannot be empty".to_string()));
        }
        if self.browse_pages.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::Invalid("browse_pages contains an empty label".to_string()));
        }

        for (name, value) in [
            ("product_page", &self.product_page),
            ("add_to_cart_event", &self.add_to_cart_event),
            ("order_event", &self.order_event),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} cannot be empty", name)));
            }
        }

        for (name, value) in [
            ("top_journeys", self.top_journeys),
            ("top_paths", self.top_paths),
            ("top_users", self.top_users),
            ("top_products", self.top_products),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be greater than 0", name)));
            }
            if value > MAX_TOP_N {
                return Err(ConfigError::Invalid(format!(
                    "{} is too large (max {})",
                    name, MAX_TOP_N
                )));
            }
        }

        Ok(())
    }

    pub fn is_browse_page(&self, page_type: &str) -> bool {
        self.browse_pages.iter().any(|p| p == page_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyticsConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.is_browse_page("listing_page"));
        assert!(config.is_browse_page("search_listing_page"));
        assert!(!config.is_browse_page("product_page"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "top_users = 5").unwrap();
        writeln!(file, "browse_pages = [\"catalog\"]").unwrap();

        let config = AnalyticsConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.top_users, 5);
        assert_eq!(config.browse_pages, vec!["catalog".to_string()]);
        assert_eq!(config.order_event, "order");
        assert_eq!(config.top_paths, DEFAULT_TOP_PATHS);
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let config = AnalyticsConfig {
            top_journeys: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_label_rejected() {
        let config = AnalyticsConfig {
            order_event: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "top_users = \"many\"").unwrap();

        let result = AnalyticsConfig::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
