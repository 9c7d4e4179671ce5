//! Endpoint URL helpers.

use anyhow::{Context, Result};
use url::Url;

/// Normalize a service endpoint.
///
/// A missing scheme defaults to `https://`, surrounding whitespace and
/// trailing slashes are removed.
pub fn normalize_endpoint(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    anyhow::bail!("Endpoint URL cannot be empty");
  }

  let lowered = trimmed.to_ascii_lowercase();
  let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
    trimmed.to_string()
  } else {
    format!("https://{trimmed}")
  };

  let url = Url::parse(&candidate).with_context(|| format!("Invalid endpoint URL: '{input}'"))?;
  if url.host_str().is_none() {
    anyhow::bail!("Endpoint URL '{input}' has no host");
  }

  Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Host part of an endpoint, used for `.netrc` lookups
pub fn endpoint_host(endpoint: &str) -> Result<String> {
  let url = Url::parse(endpoint).with_context(|| format!("Invalid endpoint URL: '{endpoint}'"))?;
  url
    .host_str()
    .map(str::to_string)
    .with_context(|| format!("Endpoint URL '{endpoint}' has no host"))
}
