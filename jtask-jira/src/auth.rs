//! Authentication helpers for the remote client.
//!
//! Centralizes the `.netrc` fallback so the CLI's plan runs and its ad-hoc
//! commands fill missing credentials the same way.

use std::path::Path;

use anyhow::{Context, Result};
use jtask_core::creds::{Credentials, netrc_credentials};
use jtask_core::url::endpoint_host;
use tracing::debug;

/// Look up `.netrc` credentials for the host of `endpoint`.
pub fn get_endpoint_credentials(home: &Path, endpoint: &str) -> Result<Option<Credentials>> {
  let host = endpoint_host(endpoint)?;
  netrc_credentials(home, &host).with_context(|| format!("Failed to look up credentials for '{host}'"))
}

/// Fill in a missing password (and, if needed, username) from `.netrc`.
///
/// Explicit values always win. A netrc password is only used when the netrc
/// login matches the explicit username, or when no username was given.
pub fn fill_from_netrc(
  home: &Path,
  endpoint: &str,
  username: Option<String>,
  password: Option<String>,
) -> Result<(Option<String>, Option<String>)> {
  if password.is_some() {
    return Ok((username, password));
  }

  let Some(found) = get_endpoint_credentials(home, endpoint)? else {
    return Ok((username, password));
  };

  match username {
    None => {
      debug!("Using .netrc login and password for {endpoint}");
      Ok((Some(found.username), Some(found.password)))
    }
    Some(name) if name == found.username => {
      debug!("Using .netrc password for {name}");
      Ok((Some(name), Some(found.password)))
    }
    Some(name) => {
      debug!(".netrc login '{}' does not match '{name}', ignoring it", found.username);
      Ok((Some(name), None))
    }
  }
}
