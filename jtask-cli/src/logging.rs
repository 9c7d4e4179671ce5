//! Tracing setup.

use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Map the `-v` count to a level, with verbose steps forcing at least INFO
pub fn level_for(verbose_count: u8, verbose_steps: bool) -> Level {
  let level = match verbose_count {
    0 => Level::WARN,  // Default: warnings and errors
    1 => Level::INFO,  // -v: info, warnings, and errors
    2 => Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => Level::TRACE, // -vvv or more: trace and everything else
  };

  if verbose_steps && level < Level::INFO {
    Level::INFO
  } else {
    level
  }
}

/// Initialize the global subscriber. Later calls are ignored.
pub fn init_tracing(verbose_count: u8, verbose_steps: bool) {
  let level = level_for(verbose_count, verbose_steps);

  let initialized = tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .try_init()
    .is_ok();

  if initialized {
    tracing::debug!("Tracing initialized with level: {}", level);
  }
}
