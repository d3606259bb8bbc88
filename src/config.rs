use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_STORAGE_KEY;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub storage_key: Option<String>,
    pub data_dir: Option<String>,
    pub activity_log: Option<bool>,
}

impl AppConfig {
    pub fn storage_key(&self) -> &str {
        self.storage_key.as_deref().unwrap_or(DEFAULT_STORAGE_KEY)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir)
    }

    pub fn activity_log_enabled(&self) -> bool {
        self.activity_log.unwrap_or(true)
    }

    pub fn activity_log_path(&self) -> PathBuf {
        self.data_dir().join("activity.jsonl")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".subtasks")
}

fn config_path() -> PathBuf {
    default_data_dir().join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.storage_key(), DEFAULT_STORAGE_KEY);
        assert!(config.activity_log_enabled());
        assert!(config.data_dir().ends_with(".subtasks"));
    }

    #[test]
    fn reads_all_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "storage_key = \"team-a\"\ndata_dir = \"/tmp/drafts\"\nactivity_log = false\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.storage_key(), "team-a");
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/drafts"));
        assert_eq!(config.activity_log_path(), PathBuf::from("/tmp/drafts/activity.jsonl"));
        assert!(!config.activity_log_enabled());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage_key = [").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
