//! # Create Issue Step
//!
//! Submits an issue draft. The generated key is logged and reported; it is
//! only written to the property store when the step names a `key_property`.

use jtask_core::PropertyStore;
use jtask_core::plan::CreateIssue;
use jtask_jira::consts::METHOD_CREATE_ISSUE;
use jtask_jira::{IssueDraft, IssueService, ServiceConnector};
use tracing::info;

use crate::tasks::{SessionContext, StepOutcome, TaskError};

pub async fn perform<C: ServiceConnector>(
  connector: &C,
  ctx: &SessionContext,
  step: &CreateIssue,
  properties: &mut PropertyStore,
) -> Result<StepOutcome, TaskError> {
  let service = connector
    .connect(ctx.endpoint())
    .map_err(TaskError::remote(METHOD_CREATE_ISSUE))?;

  let draft = IssueDraft {
    project: step.project.clone(),
    summary: step.summary.clone(),
    issue_type: step.issue_type.clone(),
  };
  ctx.trace_step(
    step.verbose,
    format_args!(
      "Calling createIssue for project {} (type {}): {}",
      draft.project, draft.issue_type, draft.summary
    ),
  );

  let created = service
    .create_issue(ctx.token(), &draft)
    .await
    .map_err(TaskError::remote(METHOD_CREATE_ISSUE))?;

  info!("Created issue {}", created.key);

  if let Some(property) = &step.key_property {
    ctx.trace_step(step.verbose, format_args!("Setting property {property} to {}", created.key));
    properties.set(property, created.key.clone());
  }

  Ok(StepOutcome::CreateIssue {
    key: created.key,
    property: step.key_property.clone(),
  })
}
