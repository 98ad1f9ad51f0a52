//! Shared helpers for cache simulator tests.


pub use harness::{TestContext, cache_config, capture_logs};
