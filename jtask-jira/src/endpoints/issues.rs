//! # Issue Methods

use anyhow::Result;
use serde_json::json;

use crate::client::JiraRpcClient;
use crate::consts::METHOD_CREATE_ISSUE;
use crate::models::{IssueDraft, RemoteIssue};

impl JiraRpcClient {
  /// Create an issue from a draft and return the stored record
  pub async fn create_issue(&self, token: &str, draft: &IssueDraft) -> Result<RemoteIssue> {
    self.call(METHOD_CREATE_ISSUE, json!([token, draft])).await
  }
}
