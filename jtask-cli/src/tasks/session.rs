//! # Session
//!
//! Resolves the parent's session attributes from every source and performs
//! the login that every child step depends on.

use std::fmt;
use std::path::Path;

use jtask_core::config::Defaults;
use jtask_core::plan::SessionConfig;
use jtask_core::url::normalize_endpoint;
use jtask_jira::auth::fill_from_netrc;
use jtask_jira::{IssueService, ServiceConnector};
use tracing::{error, warn};

use crate::consts::{ENV_ENDPOINT, ENV_PASSWORD, ENV_USERNAME};
use crate::tasks::{SessionContext, TaskError, step_trace};

const SESSION_ELEMENT: &str = "session";

/// Session attributes given on the command line
#[derive(Debug, Clone, Default)]
pub struct SessionOverrides {
  pub endpoint: Option<String>,
  pub username: Option<String>,
  pub password: Option<String>,
  pub verbose: bool,
}

/// Fully resolved session attributes, ready for login
#[derive(Clone)]
pub struct ResolvedSession {
  pub endpoint: String,
  pub username: String,
  pub password: String,
  pub verbose: bool,
}

impl fmt::Debug for ResolvedSession {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ResolvedSession")
      .field("endpoint", &self.endpoint)
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .field("verbose", &self.verbose)
      .finish()
  }
}

/// Resolve session attributes.
///
/// Each attribute is taken from the first source that has it: command line,
/// plan, environment, saved defaults. A missing password (and username) is
/// finally looked up in `<home>/.netrc` for the endpoint's host.
pub fn resolve_session<E>(
  plan: &SessionConfig,
  overrides: &SessionOverrides,
  defaults: &Defaults,
  env: E,
  home: Option<&Path>,
) -> Result<ResolvedSession, TaskError>
where
  E: Fn(&str) -> Option<String>,
{
  let raw_endpoint = overrides
    .endpoint
    .clone()
    .or_else(|| plan.web_service_endpoint_url.clone())
    .or_else(|| env(ENV_ENDPOINT))
    .or_else(|| defaults.endpoint.clone())
    .ok_or(TaskError::MissingAttribute {
      element: SESSION_ELEMENT,
      attribute: "webServiceEndpointUrl",
    })?;

  let endpoint = normalize_endpoint(&raw_endpoint).map_err(|err| TaskError::InvalidAttribute {
    attribute: "webServiceEndpointUrl",
    message: format!("{err:#}"),
  })?;

  let username = overrides
    .username
    .clone()
    .or_else(|| plan.username.clone())
    .or_else(|| env(ENV_USERNAME))
    .or_else(|| defaults.username.clone());

  let password = overrides
    .password
    .clone()
    .or_else(|| plan.password.clone())
    .or_else(|| env(ENV_PASSWORD));

  let (username, password) = match home {
    Some(home) => fill_from_netrc(home, &endpoint, username.clone(), password.clone()).unwrap_or_else(|err| {
      warn!("Ignoring .netrc: {err:#}");
      (username, password)
    }),
    None => (username, password),
  };

  let username = username.ok_or(TaskError::MissingAttribute {
    element: SESSION_ELEMENT,
    attribute: "username",
  })?;
  let password = password.ok_or(TaskError::MissingAttribute {
    element: SESSION_ELEMENT,
    attribute: "password",
  })?;

  Ok(ResolvedSession {
    endpoint,
    username,
    password,
    verbose: overrides.verbose || plan.verbose,
  })
}

/// Log in and build the context handed to child steps.
///
/// An absent or empty token aborts with [`TaskError::LoginFailed`]; no child
/// may run without a context.
pub async fn login<C: ServiceConnector>(connector: &C, session: &ResolvedSession) -> Result<SessionContext, TaskError> {
  let service = connector
    .connect(&session.endpoint)
    .map_err(TaskError::remote("login"))?;

  step_trace(
    session.verbose,
    format_args!("Obtained remote handle for {}, calling login", session.endpoint),
  );

  let token = service
    .login(&session.username, &session.password)
    .await
    .map_err(TaskError::remote("login"))?;

  match token {
    Some(token) if !token.is_empty() => {
      step_trace(session.verbose, format_args!("Logged in as {}", session.username));
      Ok(SessionContext::new(token, session.endpoint.clone(), session.verbose))
    }
    _ => {
      error!("Login failed.");
      Err(TaskError::LoginFailed)
    }
  }
}
