//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Address Indexing:** Line alignment and set selection for a cache geometry.
//! 2. **Memory References:** Access kinds and the reference records fed to every cache.
//! 3. **Error Handling:** Configuration, trace and top-level simulation errors.

/// Line alignment and set index computation.
pub mod addr;

/// Memory access type and reference definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{CacheGeometry, line_base_address};
pub use data::{AccessType, MemoryReference};
pub use error::{ConfigError, SimError, TraceError};
