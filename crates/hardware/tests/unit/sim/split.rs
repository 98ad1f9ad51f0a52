//! # Reference Splitting Tests
//!
//! A reference crossing a line boundary becomes a lower and an upper sub-reference
//! covering exactly the original byte range, resolved lower first.

use crate::common::{TestContext, cache_config};
use cachesim_core::common::{AccessType, MemoryReference, line_base_address};
use cachesim_core::config::ReplacementPolicy;
use cachesim_core::sim::{Split, split_reference};
use proptest::prelude::*;

#[test]
fn straddling_load_touches_two_lines() {
    let mut ctx = TestContext::new(cache_config(16, 4, 1, ReplacementPolicy::Lru, 0));
    ctx.reference(MemoryReference::load(0x0c, 8));

    assert_eq!(ctx.stats().accesses, 2);
    assert_eq!(ctx.stats().misses, 2);
    assert_eq!(ctx.description().references().load, 1, "counted once as a reference");
    assert!(ctx.cache().contains(0x00));
    assert!(ctx.cache().contains(0x10));
}

#[test]
fn straddling_store_dirties_both_lines() {
    let mut ctx = TestContext::new(cache_config(16, 4, 1, ReplacementPolicy::Fifo, 0));
    ctx.reference(MemoryReference::store(0x1e, 4));
    let lines = ctx.cache().lines();
    assert!(lines[1].dirty && lines[1].tag == 0x10);
    assert!(lines[2].dirty && lines[2].tag == 0x20);
}

#[test]
fn lower_part_resolves_before_upper() {
    // Both halves map to the single slot of a 1-entry cache: the upper half must be the
    // one left resident.
    let mut ctx = TestContext::new(cache_config(16, 1, 1, ReplacementPolicy::Fifo, 0));
    ctx.reference(MemoryReference::load(0x38, 16));
    assert!(ctx.cache().contains(0x40));
    assert!(!ctx.cache().contains(0x30));
}

#[test]
fn long_reference_still_splits_in_two() {
    let r = MemoryReference::fetch(0x08, 40);
    let Split::Pair { lower, upper } = split_reference(&r, 16) else {
        panic!("expected a split");
    };
    assert_eq!(lower, MemoryReference::fetch(0x08, 24));
    assert_eq!(upper, MemoryReference::fetch(0x20, 16));
}

proptest! {
    #[test]
    fn prop_split_covers_range_without_gap_or_overlap(
        shift in 0u32..8,
        address in 0u64..(1 << 48),
        length in 1u64..512,
    ) {
        let line_size = 1u64 << shift;
        let r = MemoryReference::new(AccessType::Load, address, length);
        let parts: Vec<_> = split_reference(&r, line_size).parts().collect();

        prop_assert_eq!(parts[0].address, address);
        let mut cursor = address;
        for part in &parts {
            prop_assert_eq!(part.address, cursor);
            prop_assert!(part.length > 0);
            prop_assert_eq!(part.kind, AccessType::Load);
            cursor += part.length;
        }
        prop_assert_eq!(cursor, address + length);

        let straddles = line_base_address(address, line_size)
            != line_base_address(address + length - 1, line_size);
        prop_assert_eq!(parts.len(), if straddles { 2 } else { 1 });
        if let [_, upper] = parts.as_slice() {
            prop_assert_eq!(upper.address % line_size, 0);
            prop_assert!(upper.length <= line_size);
        }
    }
}
