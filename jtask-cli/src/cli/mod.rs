//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for jtask: running plans,
//! one-off filter counts and issue creation, plan inspection and saved
//! defaults.

mod adhoc;
mod args;
mod config;
mod inspect;
mod run;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use jtask_core::output::{ColorMode, cli_styles};

/// Top-level CLI command for jtask
#[derive(Parser)]
#[command(name = "jtask")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Run issue-tracker operations from build scripts")]
#[command(
  long_about = "jtask logs into an issue tracker once and then runs the steps of a plan in order:\n\
        counting the issues of saved filters into properties and creating issues.\n\n\
        The first failing step aborts the run with a non-zero exit status."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = cli_styles())]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(long, value_enum, ignore_case = true, global = true, default_value_t = ColorMode::Auto)]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for jtask
#[derive(Subcommand)]
pub enum Commands {
  /// Execute a plan file
  #[command(long_about = "Log in and execute every step of a plan file in declaration order.\n\n\
            Properties written by the steps are printed when the run finishes. With\n\
            --properties, the store is seeded from that file and written back even\n\
            when a step fails, so results of earlier steps are kept.")]
  Run(run::RunArgs),

  /// Count the issues of a saved filter into a property
  #[command(long_about = "Log in and count the issues matched by a saved filter.\n\n\
            The count is stored as decimal text under the given property name.")]
  Count(adhoc::CountArgs),

  /// Create an issue
  #[command(long_about = "Log in and create an issue from a project key, summary and type code.\n\n\
            The generated key is printed; use --key-property to also store it.")]
  Create(adhoc::CreateArgs),

  /// Show what a plan would do without contacting the service
  #[command(alias = "show")]
  Inspect(inspect::InspectArgs),

  /// Manage saved session defaults
  #[command(long_about = "Save the endpoint and username used when a plan does not declare them.\n\n\
            Passwords are never saved; use JTASK_PASSWORD or ~/.netrc instead.")]
  Config(config::ConfigArgs),
}

/// Handle the parsed command line
pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::Run(args) => run::handle_run_command(args, cli.verbose),
    Commands::Count(args) => adhoc::handle_count_command(args, cli.verbose),
    Commands::Create(args) => adhoc::handle_create_command(args, cli.verbose),
    Commands::Inspect(args) => inspect::handle_inspect_command(args, cli.verbose),
    Commands::Config(args) => config::handle_config_command(args, cli.verbose),
  }
}
