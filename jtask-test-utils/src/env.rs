//! Environment variable management for testing
//!
//! Guards in this module save the previous value of the variables they touch
//! and restore it on drop, so a test can override the environment without
//! leaking the change into the rest of the suite.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// Overrides a single environment variable for the lifetime of the guard.
pub struct EnvVarGuard {
  name: String,
  original: Option<String>,
}

impl EnvVarGuard {
  /// Capture the current value of `name` without changing it.
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
    }
  }

  /// Set the variable to `value`.
  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  /// Remove the variable from the environment.
  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}

/// A test environment that points the XDG base directories at a per-test
/// temporary directory
pub struct XdgEnvGuard {
  /// The temporary directory backing the XDG directories
  pub temp_dir: TempDir,
  config_home: EnvVarGuard,
  data_home: EnvVarGuard,
  cache_home: EnvVarGuard,
}

impl Default for XdgEnvGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl XdgEnvGuard {
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
  pub const XDG_DATA_HOME: &'static str = "XDG_DATA_HOME";
  pub const XDG_CACHE_HOME: &'static str = "XDG_CACHE_HOME";

  /// Create a new test environment with overridden XDG directories
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let temp_path = temp_dir.path().to_path_buf();

    let config_home = EnvVarGuard::new(Self::XDG_CONFIG_HOME);
    let data_home = EnvVarGuard::new(Self::XDG_DATA_HOME);
    let cache_home = EnvVarGuard::new(Self::XDG_CACHE_HOME);

    for (guard, dir) in [(&config_home, "config"), (&data_home, "data"), (&cache_home, "cache")] {
      let path = temp_path.join(dir);
      std::fs::create_dir_all(&path).expect("Failed to create XDG directory");
      guard.set(&path.to_string_lossy());
    }

    Self {
      temp_dir,
      config_home,
      data_home,
      cache_home,
    }
  }

  /// Get the path to the XDG config directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  /// Get the path to the XDG data directory
  pub fn data_dir(&self) -> PathBuf {
    self.temp_dir.path().join("data")
  }

  /// Get the path to the XDG cache directory
  pub fn cache_dir(&self) -> PathBuf {
    self.temp_dir.path().join("cache")
  }
}
