//! Arguments shared by the commands that talk to the service.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::tasks::SessionOverrides;

/// Session attributes that override the plan
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
  /// Remote service endpoint URL
  #[arg(long, value_name = "URL")]
  pub endpoint: Option<String>,

  /// Username to log in with
  #[arg(long, short = 'u')]
  pub username: Option<String>,

  /// Password to log in with (prefer JTASK_PASSWORD or ~/.netrc)
  #[arg(long)]
  pub password: Option<String>,

  /// Show each step's diagnostic trace lines
  #[arg(long)]
  pub verbose_steps: bool,
}

impl SessionArgs {
  pub fn overrides(&self) -> SessionOverrides {
    SessionOverrides {
      endpoint: self.endpoint.clone(),
      username: self.username.clone(),
      password: self.password.clone(),
      verbose: self.verbose_steps,
    }
  }
}

/// How results are reported
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
  /// Human readable summary followed by the properties
  #[default]
  Text,
  /// A single JSON document
  Json,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
  /// Properties file to seed the store from and write results back to
  #[arg(long, short = 'p', value_name = "FILE")]
  pub properties: Option<PathBuf>,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  pub format: OutputFormat,
}
