//! Plan files for CLI and loader tests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

/// A plan file written into its own temporary directory.
///
/// The directory also serves as a scratch area for property files produced
/// by the run under test.
pub struct PlanFileGuard {
  temp_dir: TempDir,
  plan_path: PathBuf,
}

impl PlanFileGuard {
  /// Write `content` to `plan.toml` inside a fresh temporary directory.
  pub fn new(content: &str) -> Result<Self> {
    let temp_dir = TempDir::new()?;
    let plan_path = temp_dir.path().join("plan.toml");
    fs::write(&plan_path, content)?;
    Ok(Self { temp_dir, plan_path })
  }

  /// Path of the plan file.
  pub fn path(&self) -> &Path {
    &self.plan_path
  }

  /// Path of a sibling file in the same temporary directory.
  pub fn sibling(&self, name: &str) -> PathBuf {
    self.temp_dir.path().join(name)
  }
}
