//! Address decomposition for set-associative lookup.
//!
//! This module maps byte addresses onto cache structure. It provides the following:
//! 1. **Line alignment:** Clearing the offset bits to obtain the line-aligned tag.
//! 2. **Set selection:** Computing the first slot of the `ways`-wide group an address may occupy.
//! 3. **Geometry:** A small value type describing line size, entry count and associativity.
//!
//! Line sizes and set counts must be powers of two. Non-power-of-two set counts are
//! unsupported; [`CacheConfig::validate`](crate::config::CacheConfig::validate) rejects
//! them before any indexing happens.

/// Returns `log2(value)` for a power of two.
#[inline(always)]
pub const fn log2(value: u64) -> u32 {
    value.trailing_zeros()
}

/// Clears the low `log2(line_size)` bits of `addr`.
///
/// `line_size` must be a power of two.
///
/// # Arguments
///
/// * `addr` - Byte address.
/// * `line_size` - Cache line size in bytes.
///
/// # Returns
///
/// The base address of the line containing `addr`, which is also the tag stored in a slot.
#[inline(always)]
pub const fn line_base_address(addr: u64, line_size: u64) -> u64 {
    addr & !(line_size - 1)
}

/// Physical shape of a cache array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    /// Line size in bytes (power of two).
    pub line_size: u64,
    /// Total number of slots.
    pub entries: usize,
    /// Slots per set.
    pub ways: usize,
}

impl CacheGeometry {
    /// Creates a geometry description. No validation is performed here.
    pub const fn new(line_size: u64, entries: usize, ways: usize) -> Self {
        Self {
            line_size,
            entries,
            ways,
        }
    }

    /// Number of disjoint sets (`entries / ways`).
    #[inline(always)]
    pub const fn sets(&self) -> usize {
        self.entries / self.ways
    }

    /// Line-aligned base address of `addr` under this geometry.
    #[inline(always)]
    pub const fn line_base(&self, addr: u64) -> u64 {
        line_base_address(addr, self.line_size)
    }

    /// Index of the first slot of the set that `addr` maps to.
    ///
    /// Computes `((line_base(addr) >> log2(line_size)) mod sets) * ways`. The set number is
    /// reduced modulo the set count before scaling by `ways`, so the result always lies in
    /// `0..entries` and is a multiple of `ways`.
    #[inline(always)]
    pub const fn set_start_index(&self, addr: u64) -> usize {
        let line_number = self.line_base(addr) >> log2(self.line_size);
        let set = (line_number % self.sets() as u64) as usize;
        set * self.ways
    }

    /// Slot index range `start..start + ways` that `addr` may occupy.
    #[inline(always)]
    pub const fn set_range(&self, addr: u64) -> std::ops::Range<usize> {
        let start = self.set_start_index(addr);
        start..start + self.ways
    }
}
