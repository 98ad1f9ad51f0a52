//! # Replacement Policy Tests
//!
//! Verifies victim selection for FIFO, LRU, LFU and Random through the cache, using a
//! single fully-associative set so every reference competes for the same slots.

use crate::common::{TestContext, cache_config};
use cachesim_core::config::ReplacementPolicy;
use rstest::rstest;

const A: u64 = 0x000;
const B: u64 = 0x100;
const C: u64 = 0x200;
const D: u64 = 0x300;
const E: u64 = 0x400;
const F: u64 = 0x500;

/// One set of four 16-byte lines.
fn fully_associative(policy: ReplacementPolicy) -> TestContext {
    TestContext::new(cache_config(16, 4, 4, policy, 0))
}

#[test]
fn fifo_evicts_in_arrival_order() {
    let mut ctx = fully_associative(ReplacementPolicy::Fifo);
    for addr in [A, B, C, D] {
        ctx.load(addr);
    }
    // A hit does not refresh a FIFO stamp.
    ctx.load(A);
    assert_eq!(ctx.stats().hits, 1);

    ctx.load(E);
    assert!(!ctx.cache().contains(A), "first loaded is first evicted");
    for addr in [B, C, D, E] {
        assert!(ctx.cache().contains(addr));
    }

    ctx.load(F);
    assert!(!ctx.cache().contains(B), "second loaded is evicted next");
}

#[test]
fn fifo_direct_mapped_conflicts_evict_previous_occupant() {
    // 4 sets of 1 way; every address below maps to set 0.
    let mut ctx = TestContext::new(cache_config(16, 4, 1, ReplacementPolicy::Fifo, 0));
    let same_set = [0x00, 0x40, 0x80, 0xc0, 0x100];
    for (i, &addr) in same_set.iter().enumerate() {
        ctx.load(addr);
        assert!(ctx.cache().contains(addr));
        if i > 0 {
            assert!(!ctx.cache().contains(same_set[i - 1]));
        }
    }
    assert_eq!(ctx.stats().misses, 5);
    assert_eq!(ctx.valid_lines(), 1);
}

#[test]
fn lru_hit_refreshes_recency() {
    let mut ctx = fully_associative(ReplacementPolicy::Lru);
    for addr in [A, B, C, D] {
        ctx.load(addr);
    }
    ctx.load(A);
    assert_eq!(ctx.metric_of(A), 5);

    ctx.load(E);
    assert!(ctx.cache().contains(A), "recently used line survives");
    assert!(!ctx.cache().contains(B), "least recently used line is evicted");
}

#[test]
fn lfu_evicts_least_used() {
    let mut ctx = TestContext::new(cache_config(16, 2, 2, ReplacementPolicy::Lfu, 0));
    ctx.load(A);
    ctx.load(B);
    ctx.load(A);
    assert_eq!(ctx.metric_of(A), 1);
    assert_eq!(ctx.metric_of(B), 0);

    ctx.load(C);
    assert!(ctx.cache().contains(A));
    assert!(!ctx.cache().contains(B));
    assert_eq!(ctx.metric_of(C), 0, "install resets the counter");
}

#[test]
fn lfu_ties_evict_lowest_slot() {
    let mut ctx = TestContext::new(cache_config(16, 2, 2, ReplacementPolicy::Lfu, 0));
    ctx.load(A);
    ctx.load(B);
    ctx.load(C);
    assert!(!ctx.cache().contains(A), "slot 0 wins the tie");
    assert_eq!(ctx.cache().lines()[0].tag, C);
}

#[test]
fn random_evicts_exactly_one_resident_line() {
    let mut ctx = fully_associative(ReplacementPolicy::Random);
    for addr in [A, B, C, D] {
        ctx.load(addr);
    }
    ctx.load(E);
    let survivors = [A, B, C, D]
        .iter()
        .filter(|&&addr| ctx.cache().contains(addr))
        .count();
    assert_eq!(survivors, 3);
    assert!(ctx.cache().contains(E));
}

#[test]
fn random_is_reproducible_for_a_seed() {
    let trace: Vec<u64> = (0..200u64).map(|i| (i * 7 % 23) * 0x40).collect();
    let run = || {
        let mut ctx = TestContext::new(cache_config(64, 8, 4, ReplacementPolicy::Random, 0));
        for &addr in &trace {
            ctx.load(addr);
        }
        ctx.stats()
    };
    assert_eq!(run(), run());
}

#[rstest]
fn resident_line_always_hits(
    #[values(
        ReplacementPolicy::Fifo,
        ReplacementPolicy::Lru,
        ReplacementPolicy::Lfu,
        ReplacementPolicy::Random
    )]
    policy: ReplacementPolicy,
) {
    let mut ctx = TestContext::new(cache_config(32, 8, 2, policy, 2));
    for addr in [0x000, 0x020, 0x100, 0x120] {
        ctx.load(addr);
    }
    let before = ctx.valid_lines();
    let hits = ctx.stats().hits;

    ctx.load(0x100);
    ctx.store(0x104);

    assert_eq!(ctx.stats().hits, hits + 2);
    assert_eq!(ctx.valid_lines(), before);
}
