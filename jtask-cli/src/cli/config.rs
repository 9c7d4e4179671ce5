//! # Config Command
//!
//! Saves the endpoint and username used when neither the command line, the
//! plan nor the environment provide them.

use anyhow::Result;
use clap::Args;
use jtask_core::config::{Defaults, get_config_dirs};
use jtask_core::output::{format_path, print_header, print_info, print_success};
use jtask_core::url::normalize_endpoint;

use crate::logging::init_tracing;

/// Manage saved session defaults
#[derive(Args)]
pub struct ConfigArgs {
  /// Endpoint URL to save
  #[arg(long, value_name = "URL")]
  pub endpoint: Option<String>,

  /// Username to save
  #[arg(long, short = 'u')]
  pub username: Option<String>,

  /// Print the saved defaults
  #[arg(long)]
  pub show: bool,
}

pub(crate) fn handle_config_command(args: ConfigArgs, verbosity: u8) -> Result<()> {
  init_tracing(verbosity, false);

  let config_dirs = get_config_dirs()?;
  let mut defaults = config_dirs.load_defaults()?;

  let changed = apply_updates(&mut defaults, args.endpoint.as_deref(), args.username.as_deref())?;
  if changed {
    config_dirs.save_defaults(&defaults)?;
    print_success(&format!(
      "Saved defaults to {}",
      format_path(&config_dirs.defaults_path().display().to_string())
    ));
  }

  if args.show || !changed {
    print_header("Saved defaults");
    println!("  Endpoint: {}", defaults.endpoint.as_deref().unwrap_or("(not set)"));
    println!("  Username: {}", defaults.username.as_deref().unwrap_or("(not set)"));
    if !changed && !args.show {
      print_info("Use --endpoint or --username to change them.");
    }
  }

  Ok(())
}

/// Returns whether anything changed.
fn apply_updates(defaults: &mut Defaults, endpoint: Option<&str>, username: Option<&str>) -> Result<bool> {
  let mut changed = false;

  if let Some(endpoint) = endpoint {
    defaults.endpoint = Some(normalize_endpoint(endpoint)?);
    changed = true;
  }
  if let Some(username) = username {
    defaults.username = Some(username.to_string());
    changed = true;
  }

  Ok(changed)
}
