//! # Property Store
//!
//! The shared key/value output that steps write their results into. Writing
//! an existing key replaces its value. The store can be seeded from and
//! persisted to a `key=value` properties file so later build steps can pick
//! the results up.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyStore {
  values: BTreeMap<String, String>,
}

impl PropertyStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set a property, returning the previous value if there was one
  pub fn set(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
    self.values.insert(key.to_string(), value.into())
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.values.get(key).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Parse properties file content.
  ///
  /// Follows the usual properties file syntax: blank lines and lines starting
  /// with `#` or `!` are ignored, a line ending in an odd number of `\` is
  /// continued on the next one, and the key ends at the first unescaped `=`,
  /// `:` or whitespace. A key without a value maps to the empty string.
  /// `\uXXXX` escapes are decoded, including surrogate pairs.
  pub fn parse(content: &str) -> Result<Self> {
    let mut store = Self::new();
    let mut logical = String::new();
    let mut continuing = false;
    let mut start_line = 0;

    for (index, raw_line) in content.lines().enumerate() {
      let line = raw_line.trim_start();
      if !continuing {
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
          continue;
        }
        start_line = index + 1;
      }

      continuing = ends_with_line_continuation(line);
      if continuing {
        logical.push_str(&line[..line.len() - 1]);
        continue;
      }

      logical.push_str(line);
      store.insert_line(&logical, start_line)?;
      logical.clear();
    }

    if continuing {
      store.insert_line(&logical, start_line)?;
    }

    Ok(store)
  }

  fn insert_line(&mut self, line: &str, line_number: usize) -> Result<()> {
    let (raw_key, raw_value) = split_entry(line);
    let key = unescape(raw_key).with_context(|| format!("Line {line_number}: invalid property name"))?;
    let value = unescape(raw_value).with_context(|| format!("Line {line_number}: invalid value"))?;

    if key.is_empty() {
      anyhow::bail!("Line {line_number}: empty property name");
    }
    self.values.insert(key, value);
    Ok(())
  }

  /// Load a properties file; a missing file yields an empty store
  pub fn load(path: &Path) -> Result<Self> {
    if !path.exists() {
      debug!("No properties file at {}, starting empty", path.display());
      return Ok(Self::new());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read properties from {}", path.display()))?;
    let store =
      Self::parse(&content).with_context(|| format!("Failed to parse properties from {}", path.display()))?;
    debug!("Loaded {} properties from {}", store.len(), path.display());
    Ok(store)
  }

  /// Render the store in properties file syntax
  pub fn to_properties_string(&self) -> String {
    self
      .values
      .iter()
      .map(|(k, v)| format!("{}={}\n", escape(k, true), escape(v, false)))
      .collect()
  }

  /// Write the store to a properties file
  pub fn save(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, self.to_properties_string())
      .with_context(|| format!("Failed to write properties to {}", path.display()))
  }
}

fn ends_with_line_continuation(line: &str) -> bool {
  line.chars().rev().take_while(|&ch| ch == '\\').count() % 2 == 1
}

/// Split a logical line into its raw key and raw value
fn split_entry(line: &str) -> (&str, &str) {
  let mut escaped = false;
  let mut key_end = line.len();

  for (index, ch) in line.char_indices() {
    match ch {
      _ if escaped => escaped = false,
      '\\' => escaped = true,
      '=' | ':' => return (&line[..index], line[index + 1..].trim_start()),
      _ if ch.is_whitespace() => {
        key_end = index;
        break;
      }
      _ => {}
    }
  }

  let rest = line[key_end..].trim_start();
  let value = rest.strip_prefix(['=', ':']).map_or(rest, str::trim_start);
  (&line[..key_end], value)
}

fn escape(text: &str, is_key: bool) -> String {
  let mut out = String::with_capacity(text.len());
  for (index, ch) in text.char_indices() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\u{c}' => out.push_str("\\f"),
      // Leading whitespace of a value would be trimmed on load
      ' ' if is_key || index == 0 => out.push_str("\\ "),
      '=' | ':' if is_key => {
        out.push('\\');
        out.push(ch);
      }
      // A key starting with these would read back as a comment
      '#' | '!' if is_key && index == 0 => {
        out.push('\\');
        out.push(ch);
      }
      _ => out.push(ch),
    }
  }
  out
}

fn unescape(text: &str) -> Result<String> {
  let mut out = String::with_capacity(text.len());
  let mut units: Vec<u16> = Vec::new();
  let mut chars = text.chars();

  while let Some(ch) = chars.next() {
    if ch == '\\' && chars.clone().next() == Some('u') {
      chars.next();
      let hex: String = chars.by_ref().take(4).collect();
      let unit = u16::from_str_radix(&hex, 16)
        .ok()
        .filter(|_| hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .with_context(|| format!("Malformed \\u escape '\\u{hex}'"))?;
      units.push(unit);
      continue;
    }

    flush_utf16(&mut units, &mut out)?;
    if ch != '\\' {
      out.push(ch);
      continue;
    }
    match chars.next() {
      Some('n') => out.push('\n'),
      Some('r') => out.push('\r'),
      Some('t') => out.push('\t'),
      Some('f') => out.push('\u{c}'),
      Some(other) => out.push(other),
      None => {}
    }
  }

  flush_utf16(&mut units, &mut out)?;
  Ok(out)
}

fn flush_utf16(units: &mut Vec<u16>, out: &mut String) -> Result<()> {
  if !units.is_empty() {
    out.push_str(&String::from_utf16(units).context("Unpaired surrogate in \\u escapes")?);
    units.clear();
  }
  Ok(())
}
