//! Cache Replacement Policies.
//!
//! Selects eviction victims and maintains the per-line replacement metric. The set of
//! policies is closed, so each rule is a plain function matching on
//! [`ReplacementPolicy`] rather than a trait object.
//!
//! # Metric semantics
//!
//! | Policy | On install        | On hit          | Victim                    |
//! |--------|-------------------|-----------------|---------------------------|
//! | FIFO   | logical time      | unchanged       | smallest metric           |
//! | LRU    | logical time      | logical time    | smallest metric           |
//! | LFU    | 0                 | +1 (saturating) | smallest metric           |
//! | Random | unchanged         | unchanged       | uniform over the group    |
//!
//! For every policy an invalid slot is chosen before any valid one. Ties on the metric
//! go to the lowest slot index.

/// Xorshift generator backing the Random policy.
pub mod random;

pub use random::XorShift;

use tracing::trace;

use super::CacheLine;
use crate::config::ReplacementPolicy;

/// Picks the slot to evict from `group` under `policy`.
///
/// # Arguments
///
/// * `policy` - Replacement policy of the owning cache.
/// * `group` - Candidate slots (one set of the primary cache, or a whole victim cache).
/// * `rng` - Generator consumed only by [`ReplacementPolicy::Random`].
///
/// # Returns
///
/// Index into `group`.
///
/// # Panics
///
/// Panics if `group` is empty.
pub fn select_victim(policy: ReplacementPolicy, group: &[CacheLine], rng: &mut XorShift) -> usize {
    assert!(!group.is_empty(), "victim selection over an empty group");
    if let Some(empty) = first_invalid(group) {
        return empty;
    }
    match policy {
        ReplacementPolicy::Fifo | ReplacementPolicy::Lru | ReplacementPolicy::Lfu => {
            min_metric(group)
        }
        ReplacementPolicy::Random => rng.next_index(group.len()),
    }
}

/// Picks the invalid slot or, failing that, the slot with the smallest metric.
///
/// Used for victim caches, whose metrics are always logical-time stamps.
///
/// # Panics
///
/// Panics if `group` is empty.
pub fn select_oldest(group: &[CacheLine]) -> usize {
    assert!(!group.is_empty(), "victim selection over an empty group");
    first_invalid(group).unwrap_or_else(|| min_metric(group))
}

fn first_invalid(group: &[CacheLine]) -> Option<usize> {
    group.iter().position(|line| !line.valid)
}

fn min_metric(group: &[CacheLine]) -> usize {
    trace!(
        metrics = ?group.iter().map(|l| (l.tag, l.replacement)).collect::<Vec<_>>(),
        "replacement data"
    );
    let mut victim = 0;
    for (i, line) in group.iter().enumerate().skip(1) {
        if line.replacement < group[victim].replacement {
            victim = i;
        }
    }
    victim
}

/// Stamps a freshly installed (or swapped-in) line.
#[inline]
pub const fn on_install(policy: ReplacementPolicy, line: &mut CacheLine, time: u64) {
    match policy {
        ReplacementPolicy::Fifo | ReplacementPolicy::Lru => line.replacement = time,
        ReplacementPolicy::Lfu => line.replacement = 0,
        ReplacementPolicy::Random => {}
    }
}

/// Updates a line's metric on a hit.
#[inline]
pub const fn on_access(policy: ReplacementPolicy, line: &mut CacheLine, time: u64) {
    match policy {
        ReplacementPolicy::Lru => line.replacement = time,
        ReplacementPolicy::Lfu => line.replacement = line.replacement.saturating_add(1),
        ReplacementPolicy::Fifo | ReplacementPolicy::Random => {}
    }
}

/// Halves every metric in `lines` (LFU aging).
pub fn decay(lines: &mut [CacheLine]) {
    for line in lines {
        line.replacement >>= 1;
    }
}
