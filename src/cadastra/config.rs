//! # Configuration
//!
//! Stored as `config.json` in the data directory. Missing keys fall back to
//! their defaults, and a missing file is the default configuration.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_key` | `@cadastraai_users` | Key the registry is stored under |
//! | `data_file` | `storage.json` | Key-value file inside the data directory |
//! | `dark_mode` | `true` | Initial theme for clients that have one |
//!
//! `data_file` is a bare file name. It can't point outside the data directory
//! or at `config.json` itself.

use crate::error::{CadastraError, Result};
use crate::gateway::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "storage.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CadastraConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_data_file")]
    pub data_file: String,

    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_dark_mode() -> bool {
    true
}

impl Default for CadastraConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            data_file: default_data_file(),
            dark_mode: default_dark_mode(),
        }
    }
}

impl CadastraConfig {
    pub const KEYS: [&'static str; 3] = ["storage-key", "data-file", "dark-mode"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CadastraError::Io)?;
        let config: CadastraConfig =
            serde_json::from_str(&content).map_err(CadastraError::Serialization)?;
        check_data_file(&config.data_file)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CadastraError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CadastraError::Serialization)?;
        fs::write(config_path, content).map_err(CadastraError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage-key" => Some(self.storage_key.clone()),
            "data-file" => Some(self.data_file.clone()),
            "dark-mode" => Some(self.dark_mode.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "storage-key" | "data-file" if value.is_empty() => Err(CadastraError::Config(
                format!("{} cannot be empty", key),
            )),
            "storage-key" => {
                self.storage_key = value.to_string();
                Ok(())
            }
            "data-file" => {
                check_data_file(value)?;
                self.data_file = value.to_string();
                Ok(())
            }
            "dark-mode" => {
                self.dark_mode = value.parse().map_err(|_| {
                    CadastraError::Config(format!("dark-mode must be true or false, got {}", value))
                })?;
                Ok(())
            }
            other => Err(CadastraError::Config(format!("Unknown config key: {}", other))),
        }
    }
}

fn check_data_file(name: &str) -> Result<()> {
    let bad = name == CONFIG_FILENAME
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.ends_with(".tmp");
    if bad {
        return Err(CadastraError::Config(format!(
            "data-file must be a plain file name other than {}, got {}",
            CONFIG_FILENAME, name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CadastraConfig::default();
        assert_eq!(config.storage_key, "@cadastraai_users");
        assert_eq!(config.data_file, "storage.json");
        assert!(config.dark_mode);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = CadastraConfig::load(dir.path()).unwrap();
        assert_eq!(config, CadastraConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");

        let mut config = CadastraConfig::default();
        config.set("dark-mode", "false").unwrap();
        config.save(&nested).unwrap();

        let loaded = CadastraConfig::load(&nested).unwrap();
        assert!(!loaded.dark_mode);
        assert_eq!(loaded.storage_key, "@cadastraai_users");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"storage_key": "@other"}"#).unwrap();
        let config = CadastraConfig::load(dir.path()).unwrap();
        assert_eq!(config.storage_key, "@other");
        assert_eq!(config.data_file, "storage.json");
        assert!(config.dark_mode);
    }

    #[test]
    fn test_get_and_set_keys() {
        let mut config = CadastraConfig::default();
        config.set("storage-key", " @mine ").unwrap();
        assert_eq!(config.get("storage-key").as_deref(), Some("@mine"));
        assert_eq!(config.get("dark-mode").as_deref(), Some("true"));
        assert_eq!(config.get("nope"), None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = CadastraConfig::default();
        assert!(config.set("storage-key", "  ").is_err());
        assert!(config.set("dark-mode", "maybe").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, CadastraConfig::default());
    }

    #[test]
    fn test_data_file_must_be_a_plain_name() {
        let mut config = CadastraConfig::default();
        let bad_names = [
            "config.json",
            "../storage.json",
            "sub/storage.json",
            "sub\\storage.json",
            "..",
            "storage.json.tmp",
        ];
        for bad in bad_names {
            assert!(
                matches!(config.set("data-file", bad), Err(CadastraError::Config(_))),
                "accepted {}",
                bad
            );
        }
        assert_eq!(config.data_file, "storage.json");

        config.set("data-file", "people.json").unwrap();
        assert_eq!(config.data_file, "people.json");
    }

    #[test]
    fn test_load_rejects_config_as_data_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"data_file": "config.json", "dark_mode": false}"#,
        )
        .unwrap();
        assert!(matches!(
            CadastraConfig::load(dir.path()),
            Err(CadastraError::Config(_))
        ));
    }
}
