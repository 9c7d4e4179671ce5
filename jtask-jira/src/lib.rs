//! # Issue Tracker RPC Client
//!
//! Client for the issue tracker's JSON-RPC remote API. Only the three
//! operations jtask needs are implemented: `login`, `getIssueCountForFilter`
//! and `createIssue`. Each method is a `POST {endpoint}/{method}` whose body
//! is the JSON array of positional parameters.

pub mod auth;
mod client;
pub mod consts;
mod endpoints;
pub mod models;
pub mod service;

// Re-export the client
pub use client::JiraRpcClient;
// Re-export models
pub use models::{IssueDraft, RemoteIssue};
pub use service::{IssueService, RpcConnector, ServiceConnector};
