//! Path utilities for foodbridge.
//!
//! All data lives under `~/.foodbridge/`:
//! - `~/.foodbridge/config.toml` - main configuration
//! - `~/.foodbridge/foodbridge.db` - donation database

use std::path::PathBuf;

/// Returns the foodbridge home directory (`~/.foodbridge/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".foodbridge")
}

/// Returns the default config file path (`~/.foodbridge/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.foodbridge/foodbridge.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("foodbridge.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_foodbridge_home() {
        let home = home_dir();
        let config = default_config();
        let db = default_database();

        assert!(home.to_string_lossy().contains(".foodbridge"));
        assert!(config.starts_with(&home));
        assert!(db.starts_with(&home));
        assert_eq!(db.file_name().and_then(|n| n.to_str()), Some("foodbridge.db"));
    }
}
