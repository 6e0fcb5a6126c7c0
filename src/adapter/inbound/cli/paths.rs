//! Path utilities for crossedge.
//!
//! Configuration lives under `~/.crossedge/`.

use std::path::PathBuf;

/// Returns the crossedge home directory (`~/.crossedge/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".crossedge")
}

/// Returns the default config file path (`~/.crossedge/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_under_crossedge_home() {
        let config = default_config();
        assert!(config.starts_with(home_dir()));
        assert!(config.to_string_lossy().contains(".crossedge"));
    }
}
