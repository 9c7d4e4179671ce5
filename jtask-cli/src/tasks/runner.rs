//! # Plan Runner
//!
//! Logs in once, then runs each declared step exactly once, in declaration
//! order. The first failing step stops the run; properties written by the
//! steps before it stay in the store.

use jtask_core::PropertyStore;
use jtask_core::plan::StepDecl;
use jtask_jira::ServiceConnector;
use serde::Serialize;
use tracing::error;

use crate::tasks::session::{ResolvedSession, login};
use crate::tasks::{StepOutcome, TaskError, create_issue, filter_count, step_trace};

/// Outcomes of the steps of a successful run, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
  pub steps: Vec<StepOutcome>,
}

pub async fn run_plan<C: ServiceConnector>(
  connector: &C,
  session: &ResolvedSession,
  steps: &[StepDecl],
  properties: &mut PropertyStore,
) -> Result<RunReport, TaskError> {
  step_trace(session.verbose, format_args!("Running plan with {} step(s)", steps.len()));

  let ctx = login(connector, session).await?;

  let mut report = RunReport::default();
  for (index, step) in steps.iter().enumerate() {
    ctx.trace_step(
      step.verbose(),
      format_args!(
        "Step {}/{}: {} {}",
        index + 1,
        steps.len(),
        step.kind(),
        step.describe()
      ),
    );

    let result = match step {
      StepDecl::CountByFilter(count) => filter_count::perform(connector, &ctx, count, properties).await,
      StepDecl::CreateIssue(create) => create_issue::perform(connector, &ctx, create, properties).await,
    };

    match result {
      Ok(outcome) => report.steps.push(outcome),
      Err(err) => {
        error!("Step {} ({}) failed: {err}", index + 1, step.kind());
        return Err(err);
      }
    }
  }

  ctx.trace("Finished plan");
  Ok(report)
}
