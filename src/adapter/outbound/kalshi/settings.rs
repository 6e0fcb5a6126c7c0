//! Kalshi source configuration.

use serde::Deserialize;

/// Kalshi trade API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct KalshiConfig {
    /// Disabled sources report the integration as not available.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// API base URL; `/trade-api/v2` is appended.
    #[serde(default = "default_api_url")]
    pub api_url: String,
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

fn default_api_url() -> String {
    "https://api.elections.kalshi.com".into()
}

const fn default_page_size() -> usize {
    200
}

const fn default_max_pages() -> usize {
    10
}

impl Default for KalshiConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            api_url: default_api_url(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}
