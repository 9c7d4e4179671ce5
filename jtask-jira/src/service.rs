//! # Service Seam
//!
//! The task runner talks to the remote service only through these traits so
//! it can be exercised against an in-memory double. A fresh service handle
//! is obtained from the [`ServiceConnector`] for every step.

use anyhow::Result;

use crate::client::JiraRpcClient;
use crate::models::{IssueDraft, RemoteIssue};

/// The remote operations jtask depends on
#[allow(async_fn_in_trait)]
pub trait IssueService {
  /// Log in, returning `None` when the service issues no token
  async fn login(&self, username: &str, password: &str) -> Result<Option<String>>;

  /// Count the issues matched by a saved filter
  async fn get_issue_count_for_filter(&self, token: &str, filter_id: &str) -> Result<i64>;

  /// Create an issue from a draft
  async fn create_issue(&self, token: &str, draft: &IssueDraft) -> Result<RemoteIssue>;
}

/// Produces a service handle bound to an endpoint
pub trait ServiceConnector {
  type Service: IssueService;

  fn connect(&self, endpoint: &str) -> Result<Self::Service>;
}

/// Connector for the real JSON-RPC service
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcConnector;

impl ServiceConnector for RpcConnector {
  type Service = JiraRpcClient;

  fn connect(&self, endpoint: &str) -> Result<JiraRpcClient> {
    JiraRpcClient::new(endpoint)
  }
}

impl IssueService for JiraRpcClient {
  async fn login(&self, username: &str, password: &str) -> Result<Option<String>> {
    JiraRpcClient::login(self, username, password).await
  }

  async fn get_issue_count_for_filter(&self, token: &str, filter_id: &str) -> Result<i64> {
    JiraRpcClient::get_issue_count_for_filter(self, token, filter_id).await
  }

  async fn create_issue(&self, token: &str, draft: &IssueDraft) -> Result<RemoteIssue> {
    JiraRpcClient::create_issue(self, token, draft).await
  }
}
