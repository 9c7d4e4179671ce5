//! # Filter Methods

use anyhow::Result;
use serde_json::json;

use crate::client::JiraRpcClient;
use crate::consts::METHOD_FILTER_COUNT;

impl JiraRpcClient {
  /// Count the issues matched by the saved filter `filter_id`
  pub async fn get_issue_count_for_filter(&self, token: &str, filter_id: &str) -> Result<i64> {
    self.call(METHOD_FILTER_COUNT, json!([token, filter_id])).await
  }
}
