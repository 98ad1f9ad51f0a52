//! # Unit Components
//!
//! Tests grouped by library area: address indexing, configuration, the cache engine,
//! the simulation driver and inputs, and statistics.
