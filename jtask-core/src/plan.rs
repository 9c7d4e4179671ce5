//! # Plan Model
//!
//! A plan is the declarative form of one jtask invocation: the session
//! attributes of the parent element followed by an ordered list of child
//! steps. Plans are written in TOML:
//!
//! ```toml
//! username = "builder"
//! web_service_endpoint_url = "https://jira.example.com/rpc/json-rpc/jirasoapservice-v2"
//!
//! [[step]]
//! kind = "count-by-filter"
//! filter_id = "10021"
//! output_property = "jira.test.filter.count"
//! ```
//!
//! The camelCase attribute names used by older build files
//! (`webServiceEndpointUrl`, `filterID`, `filterCountProperty`) are accepted
//! as aliases.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Session attributes declared on the parent element.
///
/// Every field is optional here because the CLI, the environment, saved
/// defaults and `.netrc` can all fill gaps before the run starts.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
  #[serde(default)]
  pub username: Option<String>,
  #[serde(default)]
  pub password: Option<String>,
  #[serde(default, alias = "webServiceEndpointUrl", alias = "endpoint")]
  pub web_service_endpoint_url: Option<String>,
  /// Emit step trace lines at info level
  #[serde(default)]
  pub verbose: bool,
}

impl fmt::Debug for SessionConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SessionConfig")
      .field("username", &self.username)
      .field("password", &self.password.as_ref().map(|_| "<redacted>"))
      .field("web_service_endpoint_url", &self.web_service_endpoint_url)
      .field("verbose", &self.verbose)
      .finish()
  }
}

/// Count the issues matched by a saved filter into a property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CountByFilter {
  #[serde(alias = "filterID", alias = "filterId", deserialize_with = "string_or_integer")]
  pub filter_id: String,
  #[serde(alias = "outputProperty", alias = "filterCountProperty")]
  pub output_property: String,
  /// Trace this step at info level even when the session is quiet
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub verbose: bool,
}

/// Create an issue from a minimal draft.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateIssue {
  pub project: String,
  pub summary: String,
  #[serde(rename = "type", deserialize_with = "string_or_integer")]
  pub issue_type: String,
  /// Property that receives the generated issue key, if any
  #[serde(default, alias = "keyProperty", skip_serializing_if = "Option::is_none")]
  pub key_property: Option<String>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub verbose: bool,
}

/// One child step, in the order it was declared.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StepDecl {
  #[serde(alias = "filtercount")]
  CountByFilter(CountByFilter),
  #[serde(alias = "createissue")]
  CreateIssue(CreateIssue),
}

impl StepDecl {
  /// Element name of the step
  pub fn kind(&self) -> &'static str {
    match self {
      StepDecl::CountByFilter(_) => "count-by-filter",
      StepDecl::CreateIssue(_) => "create-issue",
    }
  }

  /// Whether the step asked for its own trace lines
  pub fn verbose(&self) -> bool {
    match self {
      StepDecl::CountByFilter(step) => step.verbose,
      StepDecl::CreateIssue(step) => step.verbose,
    }
  }

  /// Short human readable description used in logs and `inspect` output
  pub fn describe(&self) -> String {
    match self {
      StepDecl::CountByFilter(step) => format!("filter {} -> {}", step.filter_id, step.output_property),
      StepDecl::CreateIssue(step) => {
        let target = step
          .key_property
          .as_deref()
          .map(|prop| format!(" -> {prop}"))
          .unwrap_or_default();
        format!("[{}] type {} \"{}\"{target}", step.project, step.issue_type, step.summary)
      }
    }
  }
}

/// A parsed plan file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
  /// Optional plan name shown in logs
  pub name: Option<String>,
  pub session: SessionConfig,
  pub steps: Vec<StepDecl>,
  /// File the plan was loaded from, when it came from disk
  pub source: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanFile {
  #[serde(default)]
  name: Option<String>,
  #[serde(default)]
  username: Option<String>,
  #[serde(default)]
  password: Option<String>,
  #[serde(default, alias = "webServiceEndpointUrl", alias = "endpoint")]
  web_service_endpoint_url: Option<String>,
  #[serde(default)]
  verbose: bool,
  #[serde(default, rename = "step")]
  steps: Vec<StepDecl>,
}

impl From<PlanFile> for Plan {
  fn from(file: PlanFile) -> Self {
    Self {
      name: file.name,
      session: SessionConfig {
        username: file.username,
        password: file.password,
        web_service_endpoint_url: file.web_service_endpoint_url,
        verbose: file.verbose,
      },
      steps: file.steps,
      source: None,
    }
  }
}

impl Plan {
  /// Build a plan directly from a session and its steps
  pub fn new(session: SessionConfig, steps: Vec<StepDecl>) -> Self {
    Self {
      name: None,
      session,
      steps,
      source: None,
    }
  }

  /// Parse a plan from TOML text
  pub fn from_toml_str(content: &str) -> Result<Self> {
    let file: PlanFile = toml::from_str(content).context("Failed to parse plan")?;
    Ok(file.into())
  }

  /// Load a plan from a file, remembering where it came from
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read plan from {}", path.display()))?;
    let file: PlanFile =
      toml::from_str(&content).with_context(|| format!("Failed to parse plan from {}", path.display()))?;

    let mut plan = Plan::from(file);
    plan.source = Some(path.to_path_buf());
    debug!("Loaded plan from {} with {} step(s)", path.display(), plan.steps.len());
    Ok(plan)
  }

  /// Name used when reporting on this plan
  pub fn display_name(&self) -> &str {
    self.name.as_deref().unwrap_or("unnamed")
  }
}

/// Accept `filter_id = "10021"` as well as `filter_id = 10021`.
fn string_or_integer<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum StringOrInteger {
    Text(String),
    Number(i64),
  }

  Ok(match StringOrInteger::deserialize(deserializer)? {
    StringOrInteger::Text(text) => text,
    StringOrInteger::Number(number) => number.to_string(),
  })
}
