//! # jtask Core Library
//!
//! Shared building blocks for jtask: the declarative plan model, the
//! key/value property store that steps write their results into, saved
//! defaults, credential lookup and console output helpers.

pub mod config;
pub mod creds;
pub mod output;
pub mod plan;
pub mod properties;
pub mod url;

// Re-export main types
pub use config::{ConfigDirs, Defaults, get_config_dirs};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use plan::{CountByFilter, CreateIssue, Plan, SessionConfig, StepDecl};
pub use properties::PropertyStore;
