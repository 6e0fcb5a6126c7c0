//! Polymarket source configuration.

use serde::Deserialize;

/// Polymarket Gamma API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PolymarketConfig {
    /// Disabled sources report the integration as not available.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Gamma API base URL (market discovery).
    #[serde(default = "default_gamma_api_url")]
    pub gamma_api_url: String,
    /// Markets requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Maximum pages fetched per run.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

const fn default_true() -> bool {
    true
}

fn default_gamma_api_url() -> String {
    "https://gamma-api.polymarket.com".into()
}

const fn default_page_size() -> usize {
    100
}

const fn default_max_pages() -> usize {
    10
}

impl Default for PolymarketConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            gamma_api_url: default_gamma_api_url(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_uses_defaults() {
        let config: PolymarketConfig = toml::from_str("").unwrap();
        assert!(config.enabled);
        assert_eq!(config.gamma_api_url, "https://gamma-api.polymarket.com");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.max_pages, 10);
    }

    #[test]
    fn fields_override_defaults() {
        let config: PolymarketConfig = toml::from_str(
            r#"
            enabled = false
            gamma_api_url = "http://localhost:9000"
            page_size = 25
            "#,
        )
        .unwrap();
        assert!(!config.enabled);
        assert_eq!(config.gamma_api_url, "http://localhost:9000");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.max_pages, 10);
    }
}
