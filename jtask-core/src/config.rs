//! # Configuration Management
//!
//! Handles the jtask configuration directories and the saved session
//! defaults (endpoint and username) used when a plan leaves them out.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Represents the configuration directories for the jtask application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

/// Session defaults persisted in `config.toml`.
///
/// Passwords are intentionally absent: they come from the plan, the
/// command line, the environment or `.netrc`, and are never written here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
  /// Remote service endpoint URL
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub endpoint: Option<String>,
  /// Username to log in with
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("dev", "jtask", "jtask").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the defaults file
  pub fn defaults_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// Load saved defaults from file or return empty defaults
  pub fn load_defaults(&self) -> Result<Defaults> {
    let config_path = self.defaults_path();

    if !config_path.exists() {
      return Ok(Defaults::default());
    }

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read defaults from {}", config_path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse defaults from {}", config_path.display()))
  }

  /// Save defaults to file
  pub fn save_defaults(&self, defaults: &Defaults) -> Result<()> {
    let config_path = self.defaults_path();

    if let Some(parent) = config_path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(defaults).context("Failed to serialize defaults to TOML")?;

    fs::write(&config_path, content)
      .with_context(|| format!("Failed to write defaults to {}", config_path.display()))?;

    Ok(())
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn dirs_in(temp: &TempDir) -> ConfigDirs {
    ConfigDirs {
      config_dir: temp.path().join("config"),
    }
  }

  #[test]
  fn test_load_defaults_missing_file() {
    let temp = TempDir::new().unwrap();
    let dirs = dirs_in(&temp);

    assert_eq!(dirs.load_defaults().unwrap(), Defaults::default());
  }

  #[test]
  fn test_save_and_load_defaults() {
    let temp = TempDir::new().unwrap();
    let dirs = dirs_in(&temp);

    let defaults = Defaults {
      endpoint: Some("https://jira.example.com/rpc/json-rpc/jirasoapservice-v2".to_string()),
      username: Some("builder".to_string()),
    };
    dirs.save_defaults(&defaults).unwrap();

    assert!(dirs.defaults_path().exists());
    assert_eq!(dirs.load_defaults().unwrap(), defaults);
  }

  #[test]
  fn test_load_defaults_rejects_garbage() {
    let temp = TempDir::new().unwrap();
    let dirs = dirs_in(&temp);
    fs::create_dir_all(dirs.config_dir()).unwrap();
    fs::write(dirs.defaults_path(), "endpoint = [").unwrap();

    let err = dirs.load_defaults().unwrap_err();
    assert!(err.to_string().contains("Failed to parse defaults"));
  }

  #[test]
  fn test_config_dirs_follow_xdg() {
    let guard = jtask_test_utils::XdgEnvGuard::new();
    let dirs = ConfigDirs::new().unwrap();

    if cfg!(target_os = "linux") {
      assert!(dirs.config_dir().starts_with(guard.config_dir()));
      assert!(dirs.defaults_path().starts_with(guard.config_dir()));
    }
  }
}
