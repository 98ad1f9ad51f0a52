//! Error definitions.
//!
//! This module defines the failure taxonomy of the simulator. It provides:
//! 1. **Configuration errors:** Invalid geometry or parameters, detected before simulation starts.
//! 2. **Trace errors:** Unreadable or malformed reference streams; always terminal.
//! 3. **Top-level errors:** A single type the driver and CLI report to the user.
//!
//! Nothing here is retried. Internal invariant violations are not represented as errors;
//! they panic at the point of detection.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A cache description that cannot be simulated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The line size is zero or not a power of two.
    #[error("cache '{name}': line size {line_size} is not a power of two")]
    LineSizeNotPowerOfTwo {
        /// Cache name.
        name: String,
        /// Offending line size.
        line_size: u64,
    },

    /// Associativity of zero.
    #[error("cache '{name}': number of ways must be at least 1")]
    ZeroWays {
        /// Cache name.
        name: String,
    },

    /// Entry count of zero.
    #[error("cache '{name}': number of entries must be at least 1")]
    ZeroEntries {
        /// Cache name.
        name: String,
    },

    /// Entries do not partition evenly into sets.
    #[error("cache '{name}': {entries} entries is not a multiple of {ways} ways")]
    EntriesNotMultipleOfWays {
        /// Cache name.
        name: String,
        /// Configured entry count.
        entries: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// `entries / ways` is not a power of two.
    #[error("cache '{name}': set count {sets} is not a power of two")]
    SetCountNotPowerOfTwo {
        /// Cache name.
        name: String,
        /// Derived set count.
        sets: usize,
    },

    /// LFU decay interval of zero.
    #[error("cache '{name}': LFU decay interval must be at least 1")]
    ZeroDecayInterval {
        /// Cache name.
        name: String,
    },

    /// The configuration declares no caches.
    #[error("no caches configured")]
    NoCaches,

    /// The configuration file could not be read.
    #[error("cannot open cache description file {}: {source}", path.display())]
    Open {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration file is not valid JSON for a cache list.
    #[error("invalid cache description: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A reference stream that cannot be consumed to the end.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("cannot open trace file {}: {source}", path.display())]
    Open {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Reading from the trace failed part way through.
    #[error("error reading trace at line {line}: {source}")]
    Io {
        /// 1-based line number being read.
        line: usize,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A reference line does not follow the `<kind> <hex address>,<length>` format.
    #[error("bad trace file input at line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// Any failure that ends a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unusable reference stream.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
