//! Configuration loading for the vault
//!
//! Settings are resolved in this order (later wins):
//! 1. Built-in defaults
//! 2. JSON file (~/.config/lyra/vault.json)
//! 3. Runtime environment variables

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config filename in the Lyra config directory
const CONFIG_FILE: &str = "vault.json";

/// Default snapshot filename in the Lyra config directory
const DEFAULT_STATE_FILE: &str = "vault-state.json";

/// Default minimum seconds between automatic sync runs
const DEFAULT_SYNC_COOLDOWN_SECS: u64 = 30;

/// Runtime settings for the vault
#[derive(Debug, Clone, PartialEq)]
pub struct VaultConfig {
    /// Server to log in against; `None` uses the SDK's default server
    pub server_url: Option<String>,
    /// Minimum seconds between automatic sync runs
    pub sync_cooldown_secs: u64,
    /// Snapshot filename within the config directory
    pub state_file: String,
}

/// On-disk format; every field is optional
#[derive(Debug, Default, Deserialize)]
struct VaultConfigFile {
    server_url: Option<String>,
    sync_cooldown_secs: Option<u64>,
    state_file: Option<String>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            sync_cooldown_secs: DEFAULT_SYNC_COOLDOWN_SECS,
            state_file: DEFAULT_STATE_FILE.to_string(),
        }
    }
}

impl VaultConfig {
    /// Load the config from the default file (if present) and environment
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        if config::config_exists(CONFIG_FILE) {
            let file: VaultConfigFile = config::load_json(CONFIG_FILE)?;
            cfg.apply_file(file);
        }
        cfg.apply_env()?;
        Ok(cfg)
    }

    /// Load the config from a specific JSON file, without environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: VaultConfigFile = config::load_json_file(path)?;
        let mut cfg = Self::default();
        cfg.apply_file(file);
        Ok(cfg)
    }

    /// Parse the config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let file: VaultConfigFile =
            serde_json::from_str(json).context("Failed to parse vault config JSON")?;
        let mut cfg = Self::default();
        cfg.apply_file(file);
        Ok(cfg)
    }

    fn apply_file(&mut self, file: VaultConfigFile) {
        if let Some(url) = file.server_url {
            self.server_url = Some(url);
        }
        if let Some(secs) = file.sync_cooldown_secs {
            self.sync_cooldown_secs = secs;
        }
        if let Some(state_file) = file.state_file {
            self.state_file = state_file;
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("LYRA_SERVER_URL")
            && !url.is_empty()
        {
            self.server_url = Some(url);
        }
        if let Ok(secs) = std::env::var("LYRA_SYNC_COOLDOWN_SECS") {
            self.sync_cooldown_secs = secs
                .parse()
                .with_context(|| format!("Invalid LYRA_SYNC_COOLDOWN_SECS: {}", secs))?;
        }
        Ok(())
    }

    /// Get the default config file path (~/.config/lyra/vault.json)
    pub fn default_config_path() -> Option<PathBuf> {
        config::config_path(CONFIG_FILE)
    }

    /// Full path of the state snapshot
    pub fn state_path(&self) -> Option<PathBuf> {
        config::config_path(&self.state_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = VaultConfig::default();
        assert_eq!(cfg.server_url, None);
        assert_eq!(cfg.sync_cooldown_secs, 30);
        assert_eq!(cfg.state_file, "vault-state.json");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = VaultConfig::from_json(r#"{ "server_url": "https://vault.example.com" }"#).unwrap();
        assert_eq!(cfg.server_url.as_deref(), Some("https://vault.example.com"));
        assert_eq!(cfg.sync_cooldown_secs, 30);
    }

    #[test]
    fn test_full_json() {
        let cfg = VaultConfig::from_json(
            r#"{
                "server_url": "https://vault.example.com",
                "sync_cooldown_secs": 120,
                "state_file": "alt-state.json"
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.sync_cooldown_secs, 120);
        assert_eq!(cfg.state_file, "alt-state.json");
    }

    #[test]
    fn test_invalid_json() {
        assert!(VaultConfig::from_json("{ nope").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.json");
        std::fs::write(&path, r#"{ "sync_cooldown_secs": 5 }"#).unwrap();

        let cfg = VaultConfig::from_file(&path).unwrap();
        assert_eq!(cfg.sync_cooldown_secs, 5);
        assert_eq!(cfg.server_url, None);
    }
}
