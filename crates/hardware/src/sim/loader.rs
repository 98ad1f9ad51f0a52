//! Configuration and trace loading.
//!
//! This module opens the two inputs of a run. It performs:
//! 1. **Configuration loading:** Reads a JSON cache list from disk and validates every cache.
//! 2. **Trace opening:** Wraps a trace file in a buffered [`TraceReader`].

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use super::trace::TraceReader;
use crate::common::{ConfigError, TraceError};
use crate::config::SimConfig;

/// Parses and validates a cache list from JSON text.
///
/// # Errors
///
/// [`ConfigError::Parse`] for invalid JSON, otherwise any validation error.
pub fn parse_config(json: &str) -> Result<SimConfig, ConfigError> {
    let config: SimConfig = serde_json::from_str(json)?;
    config.validate()?;
    for cache in &config.caches {
        debug!(
            name = %cache.name,
            line_size = cache.line_size,
            entries = cache.entries,
            ways = cache.ways,
            policy = cache.policy.name(),
            write_back = cache.write_back,
            decay_interval = cache.decay_interval,
            victim_entries = cache.victim_entries,
            "cache description"
        );
    }
    Ok(config)
}

/// Reads and validates a cache description file.
///
/// # Errors
///
/// [`ConfigError::Open`] if the file cannot be read, otherwise as [`parse_config`].
pub fn load_config(path: impl AsRef<Path>) -> Result<SimConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

/// Opens a trace file for reading.
///
/// # Errors
///
/// [`TraceError::Open`] if the file cannot be opened.
pub fn open_trace(path: impl AsRef<Path>) -> Result<TraceReader<BufReader<File>>, TraceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TraceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TraceReader::new(BufReader::new(file)))
}
