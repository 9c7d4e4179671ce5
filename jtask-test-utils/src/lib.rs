//! Test utilities shared across the jtask workspace
//!
//! This crate provides common testing infrastructure including:
//! - single environment variable overrides ([`EnvVarGuard`])
//! - XDG directory isolation ([`XdgEnvGuard`])
//! - temporary `.netrc` homes ([`NetrcGuard`])
//! - plan files on disk ([`PlanFileGuard`])
//!
//! The dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod netrc;
pub mod plan;

// Re-export commonly used items
pub use env::{EnvVarGuard, XdgEnvGuard};
pub use netrc::NetrcGuard;
pub use plan::PlanFileGuard;
