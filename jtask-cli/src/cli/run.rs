//! # Run Command
//!
//! Executes a plan against the real service and reports the results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use directories::BaseDirs;
use jtask_core::config::{Defaults, get_config_dirs};
use jtask_core::output::{format_issue_key, format_property, print_header, print_success, print_warning};
use jtask_core::{Plan, PropertyStore, StepDecl};
use jtask_jira::RpcConnector;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::cli::args::{OutputArgs, OutputFormat, SessionArgs};
use crate::logging::init_tracing;
use crate::tasks::{RunReport, StepOutcome, resolve_session, run_plan};

/// Command for executing a plan file
#[derive(Args)]
pub struct RunArgs {
  /// Plan file to execute
  #[arg(value_name = "PLAN")]
  pub plan: PathBuf,

  #[command(flatten)]
  pub session: SessionArgs,

  #[command(flatten)]
  pub output: OutputArgs,
}

pub(crate) fn handle_run_command(args: RunArgs, verbosity: u8) -> Result<()> {
  let plan = Plan::load(&args.plan)?;
  let verbose_steps =
    args.session.verbose_steps || plan.session.verbose || plan.steps.iter().any(StepDecl::verbose);
  init_tracing(verbosity, verbose_steps);

  execute_plan(&plan, &args.session, &args.output)
}

/// Resolve the session, run the plan and report.
///
/// When a properties file is in use it is written back whether or not the
/// run succeeded.
pub(crate) fn execute_plan(plan: &Plan, session: &SessionArgs, output: &OutputArgs) -> Result<()> {
  let defaults = load_defaults()?;
  let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

  let resolved = resolve_session(
    &plan.session,
    &session.overrides(),
    &defaults,
    |key| std::env::var(key).ok(),
    home.as_deref(),
  )?;

  let mut properties = match &output.properties {
    Some(path) => PropertyStore::load(path)?,
    None => PropertyStore::new(),
  };

  info!(
    "Running plan '{}' against {} as {}",
    plan.display_name(),
    resolved.endpoint,
    resolved.username
  );

  let rt = Runtime::new().context("Failed to create async runtime")?;
  let result = rt.block_on(run_plan(&RpcConnector, &resolved, &plan.steps, &mut properties));

  if let Some(path) = &output.properties {
    match (properties.save(path), &result) {
      (Ok(()), _) => debug!("Wrote {} propertie(s) to {}", properties.len(), path.display()),
      (Err(err), Ok(_)) => return Err(err),
      (Err(err), Err(_)) => print_warning(&format!("Could not save properties: {err:#}")),
    }
  }

  let report = result?;
  render(output.format, plan, &report, &properties)
}

fn load_defaults() -> Result<Defaults> {
  match get_config_dirs() {
    Ok(dirs) => dirs.load_defaults(),
    Err(err) => {
      debug!("No configuration directory available: {err:#}");
      Ok(Defaults::default())
    }
  }
}

fn render(format: OutputFormat, plan: &Plan, report: &RunReport, properties: &PropertyStore) -> Result<()> {
  match format {
    OutputFormat::Json => {
      let document = serde_json::json!({
        "plan": plan.display_name(),
        "steps": report.steps,
        "properties": properties,
      });
      println!(
        "{}",
        serde_json::to_string_pretty(&document).context("Failed to render JSON output")?
      );
    }
    OutputFormat::Text => {
      for outcome in &report.steps {
        print_success(&describe_outcome(outcome));
      }
      if !properties.is_empty() {
        print_header("Properties");
        print!("{}", properties.to_properties_string());
      }
    }
  }
  Ok(())
}

fn describe_outcome(outcome: &StepOutcome) -> String {
  match outcome {
    StepOutcome::CountByFilter {
      filter_id,
      property,
      count,
    } => format!("Filter {filter_id}: {count} issue(s) -> {}", format_property(property)),
    StepOutcome::CreateIssue { key, property: None } => format!("Created issue {}", format_issue_key(key)),
    StepOutcome::CreateIssue {
      key,
      property: Some(property),
    } => format!(
      "Created issue {} -> {}",
      format_issue_key(key),
      format_property(property)
    ),
  }
}
