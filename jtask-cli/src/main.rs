//! # jtask CLI Entry Point
//!
//! The main entry point for the jtask command-line tool, which runs issue
//! tracker operations (filter counts and issue creation) from build scripts.

use clap::Parser;
use jtask_cli::cli::{Cli, handle_cli};
use jtask_core::output::print_error;

fn main() {
  // Parse CLI arguments using the derive-based implementation
  let cmd = Cli::parse();

  // Tracing is initialized by each command once its verbosity is known
  if let Err(err) = handle_cli(cmd) {
    print_error(&format!("Build failed: {err:#}"));
    std::process::exit(1);
  }
}
