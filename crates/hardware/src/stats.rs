//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters of every simulated cache. It provides:
//! 1. **Cache counters:** Accesses, hits, misses, line reads and dirty write-backs.
//! 2. **Reference mix:** Counts of top-level references by access kind.
//! 3. **Reports:** A serializable snapshot per cache, printable as a table or JSON.

use serde::Serialize;

use crate::common::AccessType;
use crate::config::ReplacementPolicy;

/// Counters for one cache level (primary or victim).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Line-granular lookups.
    pub accesses: u64,
    /// Lookups that found the line.
    pub hits: u64,
    /// Lookups that did not find the line.
    pub misses: u64,
    /// Lines read from the next level of memory.
    pub miss_reads: u64,
    /// Dirty lines written back on eviction.
    pub dirty_writebacks: u64,
}

impl CacheStats {
    /// Hit rate as a percentage of accesses, or zero when there were none.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            (self.hits as f64 / self.accesses as f64) * 100.0
        }
    }
}

/// Number of top-level references seen, by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceCounts {
    /// Instruction fetches.
    pub fetch: u64,
    /// Data loads.
    pub load: u64,
    /// Data stores.
    pub store: u64,
}

impl ReferenceCounts {
    /// Counts one reference of `kind`.
    #[inline]
    pub const fn record(&mut self, kind: AccessType) {
        match kind {
            AccessType::Fetch => self.fetch += 1,
            AccessType::Load => self.load += 1,
            AccessType::Store => self.store += 1,
        }
    }

    /// Count for a single kind.
    pub const fn get(&self, kind: AccessType) -> u64 {
        match kind {
            AccessType::Fetch => self.fetch,
            AccessType::Load => self.load,
            AccessType::Store => self.store,
        }
    }

    /// Sum over all kinds.
    pub const fn total(&self) -> u64 {
        self.fetch + self.load + self.store
    }
}

/// Final figures for one cache description.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CacheReport {
    /// Cache name.
    pub name: String,
    /// Line size in bytes.
    pub line_size: u64,
    /// Total primary entries.
    pub entries: usize,
    /// Associativity.
    pub ways: usize,
    /// Replacement policy.
    pub policy: ReplacementPolicy,
    /// Write-back flag as configured.
    pub write_back: bool,
    /// References seen, by kind.
    pub references: ReferenceCounts,
    /// Primary cache counters.
    pub cache: CacheStats,
    /// Victim cache size and counters, when the victim cache is enabled.
    pub victim: Option<VictimReport>,
}

/// Final figures for a victim cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct VictimReport {
    /// Victim cache lines.
    pub entries: usize,
    /// Victim cache counters.
    pub stats: CacheStats,
}

/// Reports for every simulated cache, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SimReport {
    /// One entry per cache description.
    pub caches: Vec<CacheReport>,
}

impl SimReport {
    /// Looks up a cache report by name.
    pub fn get(&self, name: &str) -> Option<&CacheReport> {
        self.caches.iter().find(|c| c.name == name)
    }

    /// Prints all cache reports to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("CACHE SIMULATION STATISTICS");
        println!("==========================================================");
        for report in &self.caches {
            report.print();
            println!("----------------------------------------------------------");
        }
    }
}

impl CacheReport {
    /// Prints this cache's figures to stdout.
    pub fn print(&self) {
        let refs = self.references;
        println!("{}", self.name);
        println!(
            "  geometry               {} entries, {}-way, {} byte lines, {}, {}",
            self.entries,
            self.ways,
            self.line_size,
            self.policy.name(),
            if self.write_back { "write-back" } else { "write-thru" }
        );
        println!("  refs.total             {}", refs.total());
        println!("  refs.fetch             {}", refs.fetch);
        println!("  refs.load              {}", refs.load);
        println!("  refs.store             {}", refs.store);
        print_level("cache", &self.cache);
        if let Some(victim) = &self.victim {
            println!("  victim.entries         {}", victim.entries);
            print_level("victim", &victim.stats);
        }
    }
}

fn print_level(prefix: &str, stats: &CacheStats) {
    let label = |field: &str| format!("{prefix}.{field}");
    println!("  {:<22} {}", label("accesses"), stats.accesses);
    println!(
        "  {:<22} {} ({:.2}%)",
        label("hits"),
        stats.hits,
        stats.hit_rate()
    );
    println!("  {:<22} {}", label("misses"), stats.misses);
    println!("  {:<22} {}", label("miss_reads"), stats.miss_reads);
    println!("  {:<22} {}", label("dirty_writebacks"), stats.dirty_writebacks);
}
