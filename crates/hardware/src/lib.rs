//! Trace-driven cache simulator library.
//!
//! This crate simulates independently configured caches against a stream of memory references:
//! 1. **Common:** Address indexing, reference records, and error types.
//! 2. **Cache:** Set-associative arrays, replacement policies, and victim caches.
//! 3. **Simulation:** Reference splitting, the multi-cache driver, and trace/config loading.
//! 4. **Statistics:** Per-cache counters and reports.
//!
//! Simulation is single-threaded and deterministic for a given configuration and trace.

/// Common types (address indexing, access kinds, references, errors).
pub mod common;
/// Cache configuration records and validation.
pub mod config;
/// Cache arrays, victim cache, and replacement policy engine.
pub mod cache;
/// Driver, splitter, trace reader, and loaders.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Per-cache configuration; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::{CacheConfig, SimConfig};
/// Primary cache with its victim cache.
pub use crate::cache::Cache;
/// Top-level driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
