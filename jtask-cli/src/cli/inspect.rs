//! # Inspect Command
//!
//! Prints what a plan declares without logging in or running anything.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use jtask_core::Plan;
use jtask_core::output::{format_path, print_header, print_info};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::logging::init_tracing;

/// Show the session and steps of a plan file
#[derive(Args)]
pub struct InspectArgs {
  /// Plan file to inspect
  #[arg(value_name = "PLAN")]
  pub plan: PathBuf,
}

#[derive(Tabled)]
struct StepRow {
  #[tabled(rename = "#")]
  index: usize,
  #[tabled(rename = "Kind")]
  kind: &'static str,
  #[tabled(rename = "Details")]
  details: String,
}

pub(crate) fn handle_inspect_command(args: InspectArgs, verbosity: u8) -> Result<()> {
  init_tracing(verbosity, false);

  let plan = Plan::load(&args.plan)?;

  print_header(&format!("Plan {}", plan.display_name()));
  if let Some(source) = &plan.source {
    println!("  Source:   {}", format_path(&source.display().to_string()));
  }
  println!(
    "  Endpoint: {}",
    plan.session.web_service_endpoint_url.as_deref().unwrap_or("(from defaults)")
  );
  println!(
    "  Username: {}",
    plan.session.username.as_deref().unwrap_or("(from defaults)")
  );
  // The password itself is never printed
  println!(
    "  Password: {}",
    if plan.session.password.is_some() {
      "set"
    } else {
      "not set"
    }
  );
  println!("  Verbose:  {}", plan.session.verbose);

  let rows = step_rows(&plan);
  if rows.is_empty() {
    print_info("No steps declared.");
  } else {
    print_header("Steps");
    println!("{}", Table::new(rows).with(Style::sharp()));
  }

  Ok(())
}

fn step_rows(plan: &Plan) -> Vec<StepRow> {
  plan
    .steps
    .iter()
    .enumerate()
    .map(|(index, step)| StepRow {
      index: index + 1,
      kind: step.kind(),
      details: step.describe(),
    })
    .collect()
}
