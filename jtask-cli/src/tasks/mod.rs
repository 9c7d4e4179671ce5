//! # Tasks
//!
//! The parent/child execution model. The parent logs in once through
//! [`session::login`], producing a [`SessionContext`] that carries the session
//! token, then [`runner::run_plan`] hands that context to every child step in
//! declaration order. The first failure aborts the run.
//!
//! Configuration (what the caller declared) and execution context (what the
//! run obtained) are separate types: children never see credentials, and the
//! token never appears in the configuration.

pub mod create_issue;
pub mod filter_count;
pub mod runner;
pub mod session;

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

pub use runner::{RunReport, run_plan};
pub use session::{ResolvedSession, SessionOverrides, resolve_session};

/// Fatal failures of a run
#[derive(Debug, Error)]
pub enum TaskError {
  /// Login completed without producing a session token
  #[error("Login failed")]
  LoginFailed,

  /// A remote call failed; the message is the underlying error
  #[error("{message}")]
  Remote { operation: &'static str, message: String },

  #[error("Missing required attribute '{attribute}' on {element}")]
  MissingAttribute {
    element: &'static str,
    attribute: &'static str,
  },

  #[error("Invalid {attribute}: {message}")]
  InvalidAttribute { attribute: &'static str, message: String },
}

impl TaskError {
  /// Wrap a client error raised while performing `operation`
  pub(crate) fn remote(operation: &'static str) -> impl FnOnce(anyhow::Error) -> TaskError {
    move |err| TaskError::Remote {
      operation,
      message: format!("{err:#}"),
    }
  }
}

/// What a step produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StepOutcome {
  CountByFilter {
    filter_id: String,
    property: String,
    count: i64,
  },
  CreateIssue {
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    property: Option<String>,
  },
}

/// Execution context handed from the parent to each child step.
///
/// Only [`session::login`] can build one, so holding a context proves a
/// token exists.
pub struct SessionContext {
  token: String,
  endpoint: String,
  verbose: bool,
}

impl SessionContext {
  pub(crate) fn new(token: String, endpoint: String, verbose: bool) -> Self {
    Self {
      token,
      endpoint,
      verbose,
    }
  }

  pub fn token(&self) -> &str {
    &self.token
  }

  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  /// Diagnostic line that is promoted to info level in verbose mode
  pub(crate) fn trace(&self, message: impl fmt::Display) {
    step_trace(self.verbose, message);
  }

  /// Whether a step's trace lines are promoted: the session or the step
  /// itself may ask for it
  pub(crate) fn verbose_for(&self, step_verbose: bool) -> bool {
    self.verbose || step_verbose
  }

  pub(crate) fn trace_step(&self, step_verbose: bool, message: impl fmt::Display) {
    step_trace(self.verbose_for(step_verbose), message);
  }
}

impl fmt::Debug for SessionContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SessionContext")
      .field("token", &"<redacted>")
      .field("endpoint", &self.endpoint)
      .field("verbose", &self.verbose)
      .finish()
  }
}

pub(crate) fn step_trace(verbose: bool, message: impl fmt::Display) {
  if verbose {
    info!("{message}");
  } else {
    debug!("{message}");
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_task_error_messages() {
    assert_eq!(TaskError::LoginFailed.to_string(), "Login failed");

    let remote = TaskError::remote("getIssueCountForFilter")(anyhow::anyhow!("Filter not found"));
    assert_eq!(remote.to_string(), "Filter not found");

    let missing = TaskError::MissingAttribute {
      element: "session",
      attribute: "username",
    };
    assert_eq!(missing.to_string(), "Missing required attribute 'username' on session");
  }

  #[test]
  fn test_remote_error_keeps_cause_chain() {
    let err = anyhow::anyhow!("connection refused").context("Failed to call login at https://jira.example.com");
    let remote = TaskError::remote("login")(err);
    assert_eq!(
      remote.to_string(),
      "Failed to call login at https://jira.example.com: connection refused"
    );
  }

  #[test]
  fn test_step_verbose_promotes_quiet_session() {
    let quiet = SessionContext::new("T".to_string(), "https://jira.example.com".to_string(), false);
    assert!(!quiet.verbose_for(false));
    assert!(quiet.verbose_for(true));

    let loud = SessionContext::new("T".to_string(), "https://jira.example.com".to_string(), true);
    assert!(loud.verbose_for(false));
  }

  #[test]
  fn test_context_debug_redacts_token() {
    let ctx = SessionContext::new("ABC123".to_string(), "https://jira.example.com".to_string(), true);
    assert!(!format!("{ctx:?}").contains("ABC123"));
  }

  #[test]
  fn test_outcome_serialization() {
    let outcome = StepOutcome::CreateIssue {
      key: "TST-1".to_string(),
      property: None,
    };
    assert_eq!(
      serde_json::to_value(&outcome).unwrap(),
      serde_json::json!({ "kind": "create-issue", "key": "TST-1" })
    );
  }
}
