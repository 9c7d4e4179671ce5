//! # Credential Lookup
//!
//! Read-only `.netrc` lookup used to fill in a session's username and
//! password when neither the plan nor the command line supplies them.
//! jtask never writes credentials anywhere.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Represents credentials for the remote service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// Returns the path to the `.netrc` file for the provided home directory.
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Looks up credentials for `host` in `<home>/.netrc`.
///
/// A `machine` entry matching the host wins; otherwise a `default` entry is
/// used. Entries missing either `login` or `password` are skipped. A missing
/// `.netrc` file is not an error.
pub fn netrc_credentials(home: &Path, host: &str) -> Result<Option<Credentials>> {
  let path = get_netrc_path(home);
  if !path.exists() {
    return Ok(None);
  }

  let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
  Ok(find_in_netrc(&content, host))
}

#[derive(Default)]
struct Entry {
  machine: Option<String>,
  login: Option<String>,
  password: Option<String>,
}

impl Entry {
  fn into_credentials(self) -> Option<Credentials> {
    Some(Credentials {
      username: self.login?,
      password: self.password?,
    })
  }
}

/// Parses netrc content. Both the single-line and multi-line layouts work
/// because the format is a flat stream of whitespace separated tokens.
fn find_in_netrc(content: &str, host: &str) -> Option<Credentials> {
  let mut entries: Vec<Entry> = Vec::new();
  let mut tokens = content
    .lines()
    .filter(|line| !line.trim_start().starts_with('#'))
    .flat_map(str::split_whitespace);

  while let Some(token) = tokens.next() {
    match token {
      "machine" => entries.push(Entry {
        machine: tokens.next().map(str::to_string),
        ..Default::default()
      }),
      "default" => entries.push(Entry::default()),
      "login" => {
        let value = tokens.next().map(str::to_string);
        if let Some(entry) = entries.last_mut() {
          entry.login = value;
        }
      }
      "password" => {
        let value = tokens.next().map(str::to_string);
        if let Some(entry) = entries.last_mut() {
          entry.password = value;
        }
      }
      "account" | "macdef" => {
        tokens.next();
      }
      _ => {}
    }
  }

  let (matching, rest): (Vec<_>, Vec<_>) = entries
    .into_iter()
    .partition(|entry| entry.machine.as_deref() == Some(host));

  matching
    .into_iter()
    .find_map(Entry::into_credentials)
    .or_else(|| {
      rest
        .into_iter()
        .filter(|entry| entry.machine.is_none())
        .find_map(Entry::into_credentials)
    })
}
