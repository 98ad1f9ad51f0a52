//! Simulation driver, reference splitting, and input loading.
//!
//! Provides the cache descriptions driven by the trace, the line-boundary splitter,
//! the trace reader, and helpers to open configuration and trace files.

/// Cache description: a cache plus its logical clock and reference mix.
pub mod description;
/// Configuration and trace file loading.
pub mod loader;
/// Driver owning all descriptions.
pub mod simulator;
/// Line-boundary reference splitting.
pub mod split;
/// Trace file parsing.
pub mod trace;

pub use description::CacheDescription;
pub use simulator::{Simulator, simulate};
pub use split::{Split, split_reference};
pub use trace::TraceReader;
