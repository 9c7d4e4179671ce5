//! # Filter Count Step
//!
//! Counts the issues matched by a saved filter and stores the count, as
//! decimal text, under the requested property.

use jtask_core::PropertyStore;
use jtask_core::plan::CountByFilter;
use jtask_jira::consts::METHOD_FILTER_COUNT;
use jtask_jira::{IssueService, ServiceConnector};

use crate::tasks::{SessionContext, StepOutcome, TaskError};

pub async fn perform<C: ServiceConnector>(
  connector: &C,
  ctx: &SessionContext,
  step: &CountByFilter,
  properties: &mut PropertyStore,
) -> Result<StepOutcome, TaskError> {
  let service = connector
    .connect(ctx.endpoint())
    .map_err(TaskError::remote(METHOD_FILTER_COUNT))?;

  ctx.trace_step(step.verbose, format_args!("Calling filter count for filter {}", step.filter_id));

  let count = service
    .get_issue_count_for_filter(ctx.token(), &step.filter_id)
    .await
    .map_err(TaskError::remote(METHOD_FILTER_COUNT))?;

  ctx.trace_step(
    step.verbose,
    format_args!("Got filter count at {count}, setting property {}", step.output_property),
  );
  properties.set(&step.output_property, count.to_string());

  Ok(StepOutcome::CountByFilter {
    filter_id: step.filter_id.clone(),
    property: step.output_property.clone(),
    count,
  })
}
