use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::consts::USER_AGENT;
use crate::models::RemoteFault;

/// Represents a connection to one remote service endpoint
pub struct JiraRpcClient {
  pub(crate) client: Client,
  pub(crate) endpoint: String,
}

impl JiraRpcClient {
  /// Create a new client for the given endpoint
  pub fn new(endpoint: &str) -> Result<Self> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      client,
      endpoint: endpoint.trim_end_matches('/').to_string(),
    })
  }

  /// Endpoint this client talks to
  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  /// Invoke a remote method with positional parameters and decode its result
  pub(crate) async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
    let url = format!("{}/{}", self.endpoint, method);
    debug!("Calling remote method {method}");

    let response = self
      .client
      .post(&url)
      .json(&params)
      .send()
      .await
      .with_context(|| format!("Failed to call {method} at {}", self.endpoint))?;

    let status = response.status();
    trace!("{method} answered with HTTP {status}");

    if status.is_success() {
      return response
        .json::<T>()
        .await
        .with_context(|| format!("Failed to parse {method} response"));
    }

    let body = response.text().await.unwrap_or_default();
    let message = fault_message(status, &body);

    match status {
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!("Authentication failed: {message}")),
      _ => Err(anyhow::anyhow!(message)),
    }
  }
}

/// Extract the most useful message from an error response body
fn fault_message(status: StatusCode, body: &str) -> String {
  serde_json::from_str::<RemoteFault>(body)
    .ok()
    .and_then(RemoteFault::into_message)
    .or_else(|| {
      let text = body.trim();
      (!text.is_empty()).then(|| text.to_string())
    })
    .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{body_json, header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  #[test]
  fn test_client_trims_trailing_slash() -> Result<()> {
    let client = JiraRpcClient::new("https://jira.example.com/rpc/json-rpc/jirasoapservice-v2/")?;
    assert_eq!(client.endpoint(), "https://jira.example.com/rpc/json-rpc/jirasoapservice-v2");
    Ok(())
  }

  #[test]
  fn test_fault_message_fallbacks() {
    assert_eq!(
      fault_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":{"message":"Filter not found"}}"#),
      "Filter not found"
    );
    assert_eq!(
      fault_message(StatusCode::BAD_GATEWAY, "upstream went away"),
      "upstream went away"
    );
    assert_eq!(fault_message(StatusCode::BAD_GATEWAY, ""), "HTTP 502 Bad Gateway");
  }

  #[tokio::test]
  async fn test_call_posts_positional_params() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = JiraRpcClient::new(&mock_server.uri())?;

    Mock::given(method("POST"))
      .and(path("/echo"))
      .and(header("content-type", "application/json"))
      .and(body_json(serde_json::json!(["a", 1])))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!("ok")))
      .expect(1)
      .mount(&mock_server)
      .await;

    let result: String = client.call("echo", serde_json::json!(["a", 1])).await?;
    assert_eq!(result, "ok");
    Ok(())
  }

  #[tokio::test]
  async fn test_call_maps_unauthorized() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = JiraRpcClient::new(&mock_server.uri())?;

    Mock::given(method("POST"))
      .and(path("/echo"))
      .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
          "message": "Invalid session token"
      })))
      .mount(&mock_server)
      .await;

    let err = client
      .call::<String>("echo", serde_json::json!([]))
      .await
      .unwrap_err();
    assert_eq!(err.to_string(), "Authentication failed: Invalid session token");
    Ok(())
  }

  #[tokio::test]
  async fn test_call_reports_undecodable_result() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = JiraRpcClient::new(&mock_server.uri())?;

    Mock::given(method("POST"))
      .and(path("/echo"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
      .mount(&mock_server)
      .await;

    let err = client.call::<i64>("echo", serde_json::json!([])).await.unwrap_err();
    assert!(err.to_string().contains("Failed to parse echo response"));
    Ok(())
  }
}
