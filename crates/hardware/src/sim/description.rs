//! A named cache together with its logical clock and reference mix.

use crate::cache::Cache;
use crate::common::MemoryReference;
use crate::config::CacheConfig;
use crate::stats::{CacheReport, ReferenceCounts, VictimReport};

use super::split::split_reference;

/// One simulated cache and the per-description running counters.
///
/// The logical time advances once per top-level reference and is the time base for
/// FIFO/LRU stamps and for LFU decay. Descriptions share no state with each other.
#[derive(Clone, Debug)]
pub struct CacheDescription {
    cache: Cache,
    time: u64,
    references: ReferenceCounts,
}

impl CacheDescription {
    /// Builds an empty description from a validated configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            cache: Cache::new(config),
            time: 0,
            references: ReferenceCounts::default(),
        }
    }

    /// Cache name.
    pub fn name(&self) -> &str {
        self.cache.name()
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// References processed so far.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// References processed so far, by kind.
    pub const fn references(&self) -> &ReferenceCounts {
        &self.references
    }

    /// Processes one top-level reference.
    ///
    /// Advances the logical clock, counts the reference by kind, then resolves it
    /// (split into lower and upper parts if it crosses a line boundary).
    pub fn simulate_reference(&mut self, reference: &MemoryReference) {
        self.time += 1;
        self.references.record(reference.kind);
        let line_size = self.cache.geometry().line_size;
        for part in split_reference(reference, line_size).parts() {
            let _ = self.cache.resolve(&part, self.time);
        }
    }

    /// Snapshot of the counters.
    pub fn report(&self) -> CacheReport {
        let geometry = self.cache.geometry();
        let victim = self.cache.victim();
        CacheReport {
            name: self.name().to_string(),
            line_size: geometry.line_size,
            entries: geometry.entries,
            ways: geometry.ways,
            policy: self.cache.policy(),
            write_back: self.cache.write_back(),
            references: self.references,
            cache: *self.cache.stats(),
            victim: victim.is_enabled().then(|| VictimReport {
                entries: victim.entries(),
                stats: *victim.stats(),
            }),
        }
    }
}
