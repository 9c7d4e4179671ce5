//! # Session Methods

use anyhow::Result;
use serde_json::json;

use crate::client::JiraRpcClient;
use crate::consts::METHOD_LOGIN;

impl JiraRpcClient {
  /// Log in and obtain a session token.
  ///
  /// Returns `Ok(None)` when the service answers without a token (a `null`
  /// or empty result); the caller decides whether that is fatal.
  pub async fn login(&self, username: &str, password: &str) -> Result<Option<String>> {
    let token: Option<String> = self.call(METHOD_LOGIN, json!([username, password])).await?;
    Ok(token.filter(|token| !token.is_empty()))
  }
}
