//! Constants for the jtask-jira client.

/// User-Agent header value for the remote client
pub const USER_AGENT: &str = concat!("jtask/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Remote method names of the JSON-RPC service
pub const METHOD_LOGIN: &str = "login";
pub const METHOD_FILTER_COUNT: &str = "getIssueCountForFilter";
pub const METHOD_CREATE_ISSUE: &str = "createIssue";
