//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::adapter::inbound::cli::{output, paths};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::matching::MatcherKind;
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.example.toml");

/// Load `path` when given, else the default file when it exists, else
/// built-in defaults.
///
/// # Errors
///
/// Returns an error if an explicit or default file fails to load.
#[allow(clippy::result_large_err)]
pub fn resolve(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }
    let default = paths::default_config();
    if default.exists() {
        debug!(path = %default.display(), "Using default config file");
        return Config::load(default);
    }
    Ok(Config::from_env_defaults())
}

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Export KALSHI_API_KEY / POLYMARKET_API_KEY if you have them");
    output::note(&format!(
        "3. Run: crossedge config validate -c {}",
        path.display()
    ));
    output::note(&format!("4. Run: crossedge run -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    let set = |present: bool| if present { "set" } else { "not set" };

    output::section("Effective Configuration");
    output::field("Path", path.display());

    output::section("Platforms");
    output::field(
        "Kalshi",
        platform_line(config.kalshi.enabled, &config.kalshi.api_url),
    );
    output::field("  API key", set(config.secrets.kalshi_api_key.is_some()));
    output::field(
        "Polymarket",
        platform_line(config.polymarket.enabled, &config.polymarket.gamma_api_url),
    );
    output::field(
        "  API key",
        set(config.secrets.polymarket_api_key.is_some()),
    );

    output::section("Network");
    output::field("Timeout", format!("{}ms", config.network.timeout_ms));
    output::field("Total budget", format!("{}ms", config.network.total_timeout_ms));
    output::field(
        "Retries",
        format!(
            "{} attempts, {}-{}ms backoff",
            config.network.retry_max_attempts,
            config.network.retry_backoff_ms,
            config.network.retry_max_backoff_ms
        ),
    );

    output::section("Matching");
    output::field("Matcher", config.matching.matcher);
    output::field(
        "Min confidence",
        format!("{:.0}%", config.matching.min_confidence * 100.0),
    );
    output::field(
        "Max drift",
        format!("{}h", config.matching.max_resolution_delta_hours),
    );
    output::field("Concurrency", config.matching.concurrency);
    if config.matching.matcher == MatcherKind::Llm {
        output::field("Provider", format!("{:?}", config.llm.provider).to_lowercase());
        output::field("Batch size", config.matching.batch_size);
    } else {
        output::field("Min score", config.matching.keyword_min_score);
    }

    output::section("Thresholds");
    output::field("Min edge", format!("{} bps", config.thresholds.min_edge_bps));

    output::section("Server");
    output::field("Bind", &config.server.bind);

    Ok(())
}

fn platform_line(enabled: bool, url: &str) -> String {
    if enabled {
        url.to_string()
    } else {
        "disabled".to_string()
    }
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config = Config::load(path)?;
    output::success("Config file is valid");

    if !config.kalshi.enabled || !config.polymarket.enabled {
        output::warning("A platform is disabled; runs will report not available");
    }
    if config.matching.matcher == MatcherKind::Llm {
        output::note("The llm matcher needs its provider API key in the environment");
    }

    output::field(
        "Next",
        format!("crossedge config show -c {}", path.display()),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn template_parses_to_defaults() {
        let config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        let defaults = Config::default();
        assert_eq!(config.kalshi.api_url, defaults.kalshi.api_url);
        assert_eq!(config.polymarket.page_size, defaults.polymarket.page_size);
        assert_eq!(config.matching.matcher, MatcherKind::Keyword);
        assert_eq!(
            config.thresholds.min_edge_bps,
            defaults.thresholds.min_edge_bps
        );
        assert_eq!(config.server.bind, defaults.server.bind);
    }

    #[test]
    fn init_writes_template() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        execute_init(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "# mine").unwrap();

        assert!(execute_init(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        execute_init(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[matching]\nmin_confidence = 1.5\n").unwrap();

        assert!(execute_validate(&path).is_err());
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[thresholds]\nmin_edge_bps = 120\n").unwrap();

        let config = resolve(Some(&path)).unwrap();
        assert_eq!(
            config.thresholds.min_edge_bps,
            rust_decimal::Decimal::from(120)
        );
    }

    #[test]
    fn resolve_fails_on_missing_explicit_path() {
        let dir = TempDir::new().unwrap();
        assert!(resolve(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
