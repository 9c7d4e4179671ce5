//! Environment variables consulted when a session attribute is not given
//! on the command line or in the plan.

pub const ENV_ENDPOINT: &str = "JTASK_ENDPOINT";
pub const ENV_USERNAME: &str = "JTASK_USERNAME";
pub const ENV_PASSWORD: &str = "JTASK_PASSWORD";
