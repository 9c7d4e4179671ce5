//! # jtask CLI Library
//!
//! The task runner that logs into the issue tracker and executes a plan's
//! steps in order, plus the command-line front end around it.

pub mod cli;
pub mod consts;
pub mod logging;
pub mod tasks;
