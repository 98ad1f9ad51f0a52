//! Fully-associative victim cache.
//!
//! Holds lines displaced from the primary cache. It is never filled from memory
//! directly: lines only arrive by being swapped out of the primary array, and leave
//! either by being swapped back on a victim hit or by being overwritten.

use super::CacheLine;
use super::policies;
use crate::stats::CacheStats;

/// Victim cache state. A size of zero disables it entirely.
#[derive(Clone, Debug)]
pub struct VictimCache {
    pub(super) lines: Vec<CacheLine>,
    pub(super) stats: CacheStats,
}

impl VictimCache {
    /// Creates a victim cache with `entries` empty lines.
    pub fn new(entries: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); entries],
            stats: CacheStats::default(),
        }
    }

    /// Whether the victim cache has any lines at all.
    #[inline]
    pub const fn is_enabled(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Number of lines.
    pub const fn entries(&self) -> usize {
        self.lines.len()
    }

    /// Slot array, for inspection.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Whether the line with base address `tag` is resident.
    pub fn contains(&self, tag: u64) -> bool {
        self.find(tag).is_some()
    }

    /// Slot holding a valid line tagged `tag`.
    pub(super) fn find(&self, tag: u64) -> Option<usize> {
        self.lines.iter().position(|l| l.valid && l.tag == tag)
    }

    /// Slot to overwrite next: any empty slot, else the oldest stamp.
    pub(super) fn select_victim(&self) -> usize {
        policies::select_oldest(&self.lines)
    }
}
