use serde::{Deserialize, Serialize};

/// Fields sent to `createIssue`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDraft {
  pub project: String,
  pub summary: String,
  #[serde(rename = "type")]
  pub issue_type: String,
}

/// Issue record returned by `createIssue`
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteIssue {
  #[serde(default)]
  pub id: Option<String>,
  pub key: String,
  #[serde(default)]
  pub project: Option<String>,
  #[serde(default)]
  pub summary: Option<String>,
  #[serde(default, rename = "type")]
  pub issue_type: Option<String>,
}

/// Error payload of a failed remote call.
///
/// The service reports faults either as `{"error": {"message": ...}}` or as
/// a bare `{"message": ...}` object.
#[derive(Debug, Deserialize)]
pub(crate) struct RemoteFault {
  #[serde(default)]
  error: Option<FaultDetail>,
  #[serde(default)]
  message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FaultDetail {
  #[serde(default)]
  message: Option<String>,
}

impl RemoteFault {
  pub(crate) fn into_message(self) -> Option<String> {
    self
      .error
      .and_then(|detail| detail.message)
      .or(self.message)
      .filter(|message| !message.trim().is_empty())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_issue_draft_serialization() {
    let draft = IssueDraft {
      project: "TST".to_string(),
      summary: "ant-jira-test1".to_string(),
      issue_type: "1".to_string(),
    };

    assert_eq!(
      serde_json::to_value(&draft).unwrap(),
      json!({ "project": "TST", "summary": "ant-jira-test1", "type": "1" })
    );
  }

  #[test]
  fn test_remote_issue_deserialization() {
    let issue: RemoteIssue = serde_json::from_value(json!({
        "id": "10000",
        "key": "TST-42",
        "project": "TST",
        "summary": "ant-jira-test1",
        "type": "1",
        "priority": "3"
    }))
    .unwrap();

    assert_eq!(issue.key, "TST-42");
    assert_eq!(issue.id.as_deref(), Some("10000"));
    assert_eq!(issue.issue_type.as_deref(), Some("1"));
  }

  #[test]
  fn test_remote_fault_message_sources() {
    let nested: RemoteFault = serde_json::from_value(json!({ "error": { "code": 500, "message": "boom" } })).unwrap();
    assert_eq!(nested.into_message().as_deref(), Some("boom"));

    let flat: RemoteFault = serde_json::from_value(json!({ "message": "flat boom" })).unwrap();
    assert_eq!(flat.into_message().as_deref(), Some("flat boom"));

    let empty: RemoteFault = serde_json::from_value(json!({ "message": "  " })).unwrap();
    assert_eq!(empty.into_message(), None);
  }
}
