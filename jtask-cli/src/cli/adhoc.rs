//! One-off commands that run a single step without a plan file.

use anyhow::Result;
use clap::Args;
use jtask_core::{CountByFilter, CreateIssue, Plan, SessionConfig, StepDecl};

use crate::cli::args::{OutputArgs, SessionArgs};
use crate::cli::run::execute_plan;
use crate::logging::init_tracing;

/// Count the issues of a saved filter
#[derive(Args)]
pub struct CountArgs {
  /// Identifier of the saved filter
  #[arg(long, value_name = "ID")]
  pub filter_id: String,

  /// Property that receives the count
  #[arg(long, value_name = "NAME")]
  pub property: String,

  #[command(flatten)]
  pub session: SessionArgs,

  #[command(flatten)]
  pub output: OutputArgs,
}

/// Create an issue
#[derive(Args)]
pub struct CreateArgs {
  /// Project key, e.g. TST
  #[arg(long)]
  pub project: String,

  /// Issue summary
  #[arg(long)]
  pub summary: String,

  /// Issue type code, e.g. 1
  #[arg(long = "type", value_name = "TYPE")]
  pub issue_type: String,

  /// Property that receives the generated key
  #[arg(long, value_name = "NAME")]
  pub key_property: Option<String>,

  #[command(flatten)]
  pub session: SessionArgs,

  #[command(flatten)]
  pub output: OutputArgs,
}

pub(crate) fn handle_count_command(args: CountArgs, verbosity: u8) -> Result<()> {
  init_tracing(verbosity, args.session.verbose_steps);

  let step = StepDecl::CountByFilter(CountByFilter {
    filter_id: args.filter_id,
    output_property: args.property,
    verbose: false,
  });
  let plan = Plan::new(SessionConfig::default(), vec![step]);

  execute_plan(&plan, &args.session, &args.output)
}

pub(crate) fn handle_create_command(args: CreateArgs, verbosity: u8) -> Result<()> {
  init_tracing(verbosity, args.session.verbose_steps);

  let step = StepDecl::CreateIssue(CreateIssue {
    project: args.project,
    summary: args.summary,
    issue_type: args.issue_type,
    key_property: args.key_property,
    verbose: false,
  });
  let plan = Plan::new(SessionConfig::default(), vec![step]);

  execute_plan(&plan, &args.session, &args.output)
}
