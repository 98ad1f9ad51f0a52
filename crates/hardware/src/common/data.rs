//! Memory Access Types.
//!
//! This module defines the classification of memory references used throughout the simulator.
//! These types are used for the following:
//! 1. **Dirty Tracking:** Stores mark the resolved line dirty; fetches and loads do not.
//! 2. **Statistics Tracking:** Counting references per kind for each simulated cache.
//! 3. **Reference Splitting:** Sub-references keep the kind of the reference they came from.

use std::fmt;

use serde::Serialize;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AccessType {
    /// Instruction fetch.
    Fetch,

    /// Data read.
    Load,

    /// Data write. Leaves the resolved line dirty.
    Store,
}

impl AccessType {
    /// Human-readable name used in debug events and reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::Load => "Load",
            Self::Store => "Store",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single memory reference from the trace: `length` bytes starting at `address`.
///
/// References are immutable once built. The splitter derives new references for the
/// two halves of a line-straddling access rather than mutating the original.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryReference {
    /// First byte touched.
    pub address: u64,
    /// Number of bytes touched (at least one).
    pub length: u64,
    /// Kind of access.
    pub kind: AccessType,
}

impl MemoryReference {
    /// Creates a reference.
    ///
    /// # Arguments
    ///
    /// * `kind` - Access kind.
    /// * `address` - First byte touched.
    /// * `length` - Byte count; zero is treated as one byte by [`last_byte`](Self::last_byte).
    pub const fn new(kind: AccessType, address: u64, length: u64) -> Self {
        Self {
            address,
            length,
            kind,
        }
    }

    /// Shorthand for an instruction fetch.
    pub const fn fetch(address: u64, length: u64) -> Self {
        Self::new(AccessType::Fetch, address, length)
    }

    /// Shorthand for a data load.
    pub const fn load(address: u64, length: u64) -> Self {
        Self::new(AccessType::Load, address, length)
    }

    /// Shorthand for a data store.
    pub const fn store(address: u64, length: u64) -> Self {
        Self::new(AccessType::Store, address, length)
    }

    /// Address of the last byte touched, saturating at the top of the address space.
    #[inline(always)]
    pub const fn last_byte(&self) -> u64 {
        let extent = if self.length == 0 { 0 } else { self.length - 1 };
        self.address.saturating_add(extent)
    }

    /// One past the last byte touched, saturating at the top of the address space.
    #[inline(always)]
    pub const fn end(&self) -> u64 {
        self.address.saturating_add(self.length)
    }
}

impl fmt::Display for MemoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#010x},{}", self.kind, self.address, self.length)
    }
}
