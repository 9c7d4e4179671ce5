use std::fs;
use std::str;

use anyhow::Result;
use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use jtask_test_utils::PlanFileGuard;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RPC_PATH: &str = "/rpc/json-rpc/jirasoapservice-v2";

/// A `jtask` command isolated from the caller's home, saved defaults and
/// `JTASK_*` variables.
fn jtask(home: &TempDir) -> Command {
  let mut cmd = cargo_bin_cmd!("jtask");
  cmd
    .env("NO_COLOR", "1")
    .env("HOME", home.path())
    .env("XDG_CONFIG_HOME", home.path().join("config"))
    .env("XDG_DATA_HOME", home.path().join("data"))
    .env("XDG_CACHE_HOME", home.path().join("cache"))
    .env_remove("JTASK_ENDPOINT")
    .env_remove("JTASK_USERNAME")
    .env_remove("JTASK_PASSWORD")
    .env_remove("RUST_LOG");
  cmd
}

fn endpoint(mock_server: &MockServer) -> String {
  format!("{}{RPC_PATH}", mock_server.uri())
}

async fn mock_login(mock_server: &MockServer, token: Value) {
  Mock::given(method("POST"))
    .and(path(format!("{RPC_PATH}/login")))
    .and(body_json(json!(["u", "p"])))
    .respond_with(ResponseTemplate::new(200).set_body_json(token))
    .expect(1)
    .mount(mock_server)
    .await;
}

async fn mock_count(mock_server: &MockServer, token: &str, filter_id: &str, response: ResponseTemplate) {
  Mock::given(method("POST"))
    .and(path(format!("{RPC_PATH}/getIssueCountForFilter")))
    .and(body_json(json!([token, filter_id])))
    .respond_with(response)
    .mount(mock_server)
    .await;
}

#[test]
fn test_help_lists_commands() {
  let home = TempDir::new().unwrap();

  jtask(&home)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("run"))
    .stdout(predicate::str::contains("count"))
    .stdout(predicate::str::contains("create"))
    .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_inspect_never_prints_password() -> Result<()> {
  let home = TempDir::new()?;
  let plan = PlanFileGuard::new(
    r#"
      name = "nightly"
      webServiceEndpointUrl = "https://jira.example.com/rpc/json-rpc/jirasoapservice-v2"
      username = "builder"
      password = "s3cret-value"

      [[step]]
      kind = "filtercount"
      filterID = "10021"
      filterCountProperty = "jira.test.filter.count"
    "#,
  )?;

  let assert = jtask(&home).arg("inspect").arg(plan.path()).assert().success();

  let stdout = str::from_utf8(&assert.get_output().stdout)?;
  assert!(stdout.contains("nightly"));
  assert!(stdout.contains("builder"));
  assert!(stdout.contains("filter 10021 -> jira.test.filter.count"));
  assert!(!stdout.contains("s3cret-value"));
  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_writes_filter_count_property() -> Result<()> {
  let mock_server = MockServer::start().await;
  mock_login(&mock_server, json!("ABC123")).await;
  mock_count(
    &mock_server,
    "ABC123",
    "10021",
    ResponseTemplate::new(200).set_body_json(json!(7)),
  )
  .await;

  let home = TempDir::new()?;
  let plan = PlanFileGuard::new(&format!(
    r#"
      webServiceEndpointUrl = "{}"
      username = "u"
      password = "p"

      [[step]]
      kind = "count-by-filter"
      filter_id = 10021
      output_property = "jira.test.filter.count"
    "#,
    endpoint(&mock_server)
  ))?;
  let properties = plan.sibling("build.properties");

  jtask(&home)
    .arg("run")
    .arg(plan.path())
    .arg("--properties")
    .arg(&properties)
    .assert()
    .success()
    .stdout(predicate::str::contains("jira.test.filter.count=7"));

  let written = fs::read_to_string(&properties)?;
  assert!(written.contains("jira.test.filter.count=7"));
  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_fails_when_login_returns_no_token() -> Result<()> {
  let mock_server = MockServer::start().await;
  mock_login(&mock_server, Value::Null).await;
  Mock::given(method("POST"))
    .and(path(format!("{RPC_PATH}/getIssueCountForFilter")))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!(7)))
    .expect(0)
    .mount(&mock_server)
    .await;

  let home = TempDir::new()?;
  let plan = PlanFileGuard::new(
    r#"
      [[step]]
      kind = "count-by-filter"
      filter_id = "10021"
      output_property = "jira.test.filter.count"
    "#,
  )?;

  jtask(&home)
    .arg("run")
    .arg(plan.path())
    .args(["--endpoint", &endpoint(&mock_server)])
    .args(["--username", "u", "--password", "p"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Build failed: Login failed"));

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_stops_at_first_failing_step() -> Result<()> {
  let mock_server = MockServer::start().await;
  mock_login(&mock_server, json!("T")).await;
  mock_count(&mock_server, "T", "1", ResponseTemplate::new(200).set_body_json(json!(3))).await;
  mock_count(
    &mock_server,
    "T",
    "2",
    ResponseTemplate::new(500).set_body_json(json!({"error": {"message": "Could not find filter with id 2"}})),
  )
  .await;
  Mock::given(method("POST"))
    .and(path(format!("{RPC_PATH}/getIssueCountForFilter")))
    .and(body_json(json!(["T", "3"])))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!(9)))
    .expect(0)
    .mount(&mock_server)
    .await;

  let home = TempDir::new()?;
  let plan = PlanFileGuard::new(
    r#"
      [[step]]
      kind = "count-by-filter"
      filter_id = "1"
      output_property = "first"

      [[step]]
      kind = "count-by-filter"
      filter_id = "2"
      output_property = "second"

      [[step]]
      kind = "count-by-filter"
      filter_id = "3"
      output_property = "third"
    "#,
  )?;
  let properties = plan.sibling("build.properties");

  jtask(&home)
    .env("JTASK_ENDPOINT", endpoint(&mock_server))
    .env("JTASK_USERNAME", "u")
    .env("JTASK_PASSWORD", "p")
    .arg("run")
    .arg(plan.path())
    .arg("--properties")
    .arg(&properties)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Could not find filter with id 2"));

  let written = fs::read_to_string(&properties)?;
  assert!(written.contains("first=3"));
  assert!(!written.contains("second"));
  assert!(!written.contains("third"));
  Ok(())
}

#[test]
fn test_run_reports_missing_password() -> Result<()> {
  let home = TempDir::new()?;
  let plan = PlanFileGuard::new(
    r#"
      webServiceEndpointUrl = "https://jira.example.com/rpc"
      username = "u"
    "#,
  )?;

  jtask(&home)
    .arg("run")
    .arg(plan.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Build failed: Missing required attribute 'password'"));

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_count_command_prints_json() -> Result<()> {
  let mock_server = MockServer::start().await;
  mock_login(&mock_server, json!("ABC123")).await;
  mock_count(
    &mock_server,
    "ABC123",
    "10021",
    ResponseTemplate::new(200).set_body_json(json!(42)),
  )
  .await;

  let home = TempDir::new()?;
  let assert = jtask(&home)
    .args(["count", "--filter-id", "10021", "--property", "open.bugs"])
    .args(["--endpoint", &endpoint(&mock_server)])
    .args(["-u", "u", "--password", "p", "--format", "json"])
    .assert()
    .success();

  let document: Value = serde_json::from_slice(&assert.get_output().stdout)?;
  assert_eq!(document["steps"][0]["kind"], "count-by-filter");
  assert_eq!(document["steps"][0]["count"], 42);
  assert_eq!(document["properties"]["open.bugs"], "42");
  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_command_stores_key() -> Result<()> {
  let mock_server = MockServer::start().await;
  mock_login(&mock_server, json!("ABC123")).await;
  Mock::given(method("POST"))
    .and(path(format!("{RPC_PATH}/createIssue")))
    .and(body_json(json!([
      "ABC123",
      {"project": "TST", "summary": "ant-jira-test1", "type": "1"}
    ])))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "10000", "key": "TST-1"})))
    .expect(1)
    .mount(&mock_server)
    .await;

  let home = TempDir::new()?;
  let properties = home.path().join("out.properties");

  jtask(&home)
    .args(["create", "--project", "TST", "--summary", "ant-jira-test1", "--type", "1"])
    .args(["--key-property", "jira.created.key"])
    .args(["--endpoint", &endpoint(&mock_server), "-u", "u", "--password", "p"])
    .arg("--properties")
    .arg(&properties)
    .assert()
    .success()
    .stdout(predicate::str::contains("TST-1"));

  assert!(fs::read_to_string(&properties)?.contains("jira.created.key=TST-1"));
  Ok(())
}

#[test]
fn test_config_saves_defaults() -> Result<()> {
  let home = TempDir::new()?;

  jtask(&home)
    .args(["config", "--endpoint", "jira.example.com/rpc/", "--username", "builder"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Saved defaults"));

  jtask(&home)
    .args(["config", "--show"])
    .assert()
    .success()
    .stdout(predicate::str::contains("https://jira.example.com/rpc"))
    .stdout(predicate::str::contains("builder"));

  Ok(())
}
