//! Set-Associative Cache Simulator.
//!
//! This module implements one simulated cache: a set-associative array of line slots,
//! an optional fully-associative victim cache behind it, and the counters for both.
//! [`Cache::resolve`] handles a single line-aligned reference, including the
//! swap protocol that moves lines between the primary array and the victim cache.
//!
//! Only tags, validity and dirty bits are modelled; data values never are.

/// Replacement policy engine (victim selection, metric updates, LFU decay).
pub mod policies;

/// Fully-associative victim cache.
pub mod victim;

use std::ops::Range;

use tracing::debug;

use self::policies::XorShift;
pub use self::victim::VictimCache;
use crate::common::{AccessType, CacheGeometry, MemoryReference};
use crate::config::{CacheConfig, ReplacementPolicy};
use crate::stats::CacheStats;

/// Cache line entry containing tag, validity, and dirty bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Slot holds a line.
    pub valid: bool,
    /// Line was stored to since it was read in.
    pub dirty: bool,
    /// Line-aligned base address of the resident line.
    pub tag: u64,
    /// Policy metric: install or touch time for FIFO/LRU, hit count for LFU.
    pub replacement: u64,
}

/// Exchanges the full contents of two slots.
///
/// This is how a line moves between the primary array and the victim cache.
#[inline]
pub fn swap_lines(a: &mut CacheLine, b: &mut CacheLine) {
    std::mem::swap(a, b);
}

/// How a line-aligned reference was satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Found in the primary array.
    Hit,
    /// Missed the primary array, found in the victim cache and swapped back in.
    VictimHit,
    /// Read from memory.
    Miss,
}

/// Result of [`Cache::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Primary slot now holding the referenced line.
    pub slot: usize,
    /// How it got there.
    pub outcome: Outcome,
}

/// A primary cache with its victim cache.
#[derive(Clone, Debug)]
pub struct Cache {
    name: String,
    geometry: CacheGeometry,
    policy: ReplacementPolicy,
    write_back: bool,
    decay_interval: u64,
    lines: Vec<CacheLine>,
    victim: VictimCache,
    rng: XorShift,
    stats: CacheStats,
}

impl Cache {
    /// Builds an empty cache from a validated configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache description; [`CacheConfig::validate`] must have succeeded.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            name: config.name.clone(),
            geometry: CacheGeometry::new(config.line_size, config.entries, config.ways),
            policy: config.policy,
            write_back: config.write_back,
            decay_interval: config.decay_interval,
            lines: vec![CacheLine::default(); config.entries],
            victim: VictimCache::new(config.victim_entries),
            rng: XorShift::new(config.random_seed),
            stats: CacheStats::default(),
        }
    }

    /// Cache name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geometry of the primary array.
    pub const fn geometry(&self) -> CacheGeometry {
        self.geometry
    }

    /// Replacement policy.
    pub const fn policy(&self) -> ReplacementPolicy {
        self.policy
    }

    /// Write-back flag as configured. Stores are always deferred through the dirty bit.
    pub const fn write_back(&self) -> bool {
        self.write_back
    }

    /// Primary slot array.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Victim cache.
    pub const fn victim(&self) -> &VictimCache {
        &self.victim
    }

    /// Primary counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Whether the line containing `addr` is valid in the primary array.
    pub fn contains(&self, addr: u64) -> bool {
        self.find(self.geometry.line_base(addr), self.geometry.set_range(addr))
            .is_some()
    }

    /// Whether the line containing `addr` is valid in the victim cache.
    pub fn victim_contains(&self, addr: u64) -> bool {
        self.victim.contains(self.geometry.line_base(addr))
    }

    /// True when no primary slot anywhere is invalid.
    pub fn is_full(&self) -> bool {
        self.lines.iter().all(|l| l.valid)
    }

    fn find(&self, tag: u64, set: Range<usize>) -> Option<usize> {
        let start = set.start;
        self.lines[set]
            .iter()
            .position(|l| l.valid && l.tag == tag)
            .map(|way| start + way)
    }

    /// Simulates one reference that lies within a single line.
    ///
    /// Looks the line up in its set; on a miss, probes the victim cache (only once the
    /// primary array is globally full), evicts by policy and installs the line. LFU
    /// counters decay when `time` is a multiple of the decay interval, and stores leave
    /// the resolved line dirty.
    ///
    /// # Arguments
    ///
    /// * `reference` - Line-contained reference.
    /// * `time` - Logical time of the owning description (its reference count).
    ///
    /// # Returns
    ///
    /// The primary slot now holding the line and how the lookup was satisfied.
    ///
    /// # Panics
    ///
    /// Panics if the resolved slot does not hold a valid copy of the referenced line,
    /// which would indicate a bug in the swap protocol.
    pub fn resolve(&mut self, reference: &MemoryReference, time: u64) -> Resolution {
        let tag = self.geometry.line_base(reference.address);
        let set = self.geometry.set_range(reference.address);
        debug!(
            cache = %self.name,
            kind = %reference.kind,
            address = format_args!("{:#010x}", reference.address),
            length = reference.length,
            "reference"
        );

        self.stats.accesses += 1;
        debug!(
            cache = %self.name,
            first = set.start,
            last = set.end - 1,
            tag = format_args!("{tag:#010x}"),
            "search cache lines"
        );

        let resolution = if let Some(slot) = self.find(tag, set.clone()) {
            self.stats.hits += 1;
            debug!(cache = %self.name, slot, "found in cache line");
            policies::on_access(self.policy, &mut self.lines[slot], time);
            Resolution {
                slot,
                outcome: Outcome::Hit,
            }
        } else {
            self.stats.misses += 1;
            let resolution = self.resolve_miss(tag, set, time);
            policies::on_install(self.policy, &mut self.lines[resolution.slot], time);
            resolution
        };

        let line = &self.lines[resolution.slot];
        assert!(
            line.valid && line.tag == tag,
            "cache '{}': slot {} does not hold line {:#x} after resolution",
            self.name,
            resolution.slot,
            tag
        );

        if self.policy == ReplacementPolicy::Lfu {
            self.check_for_decay(time);
        }
        if reference.kind == AccessType::Store {
            self.lines[resolution.slot].dirty = true;
        }
        resolution
    }

    fn resolve_miss(&mut self, tag: u64, set: Range<usize>, time: u64) -> Resolution {
        let victim_slot = if self.victim.is_enabled() && self.is_full() {
            self.victim.stats.accesses += 1;
            self.victim.find(tag)
        } else {
            None
        };

        if let Some(victim_slot) = victim_slot {
            self.victim.stats.hits += 1;
            let slot = self.select_victim(set);
            let displaced = &self.lines[slot];
            // The displaced line stays dirty in the victim cache and is counted again
            // when it leaves there.
            if displaced.valid && displaced.dirty {
                self.stats.dirty_writebacks += 1;
            }
            debug!(cache = %self.name, victim_slot, slot, "found in victim cache, swap into entry");
            swap_lines(&mut self.lines[slot], &mut self.victim.lines[victim_slot]);
            self.victim.lines[victim_slot].replacement = time;
            return Resolution {
                slot,
                outcome: Outcome::VictimHit,
            };
        }

        self.stats.miss_reads += 1;
        let slot = self.select_victim(set);
        debug!(cache = %self.name, slot, "pick victim to replace");
        if self.victim.is_enabled() {
            self.victim.stats.misses += 1;
            self.victim.stats.miss_reads += 1;
            let victim_slot = self.victim.select_victim();
            let evicted = &self.victim.lines[victim_slot];
            if evicted.valid {
                debug!(cache = %self.name, victim_slot, "evict oldest victim cache entry");
            } else {
                debug!(cache = %self.name, victim_slot, "found empty victim cache entry");
            }
            if evicted.valid && evicted.dirty {
                self.victim.stats.dirty_writebacks += 1;
            }
            swap_lines(&mut self.lines[slot], &mut self.victim.lines[victim_slot]);
            self.victim.lines[victim_slot].replacement = time;
        } else {
            let evicted = &self.lines[slot];
            if evicted.valid && evicted.dirty {
                self.stats.dirty_writebacks += 1;
            }
        }

        let line = &mut self.lines[slot];
        line.tag = tag;
        line.valid = true;
        line.dirty = false;
        debug!(
            cache = %self.name,
            tag = format_args!("{tag:#010x}"),
            slot,
            "read cache line into entry"
        );
        Resolution {
            slot,
            outcome: Outcome::Miss,
        }
    }

    fn select_victim(&mut self, set: Range<usize>) -> usize {
        debug!(
            cache = %self.name,
            lines = set.len(),
            first = set.start,
            "look for victim"
        );
        let ways = set.len();
        let start = set.start;
        let way = policies::select_victim(self.policy, &self.lines[set], &mut self.rng);
        assert!(way < ways, "cache '{}': victim way {way} outside a {ways}-way set", self.name);
        let slot = start + way;
        if self.lines[slot].valid {
            debug!(
                cache = %self.name,
                slot,
                policy = self.policy.name(),
                "chose victim by replacement policy"
            );
        } else {
            debug!(cache = %self.name, slot, "found empty cache entry");
        }
        slot
    }

    fn check_for_decay(&mut self, time: u64) {
        if time % self.decay_interval == 0 {
            debug!(cache = %self.name, time, "LFU decay for all LFU counters");
            policies::decay(&mut self.lines);
        }
    }
}
