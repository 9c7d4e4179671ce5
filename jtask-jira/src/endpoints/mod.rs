//! # Remote Methods
//!
//! One module per area of the remote API: session handling, saved filters
//! and issues.

pub mod filters;
pub mod issues;
pub mod session;
