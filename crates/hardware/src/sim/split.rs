//! Splitting references that straddle a cache-line boundary.

use crate::common::{MemoryReference, line_base_address};

/// A reference after alignment to cache lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Split {
    /// Fits in one line; passed on unchanged.
    Single(MemoryReference),
    /// Crosses a boundary; `lower` must be resolved before `upper`.
    Pair {
        /// Part starting at the original address.
        lower: MemoryReference,
        /// Part starting at the base of the line holding the last byte.
        upper: MemoryReference,
    },
}

impl Split {
    /// Sub-references in resolution order.
    pub fn parts(&self) -> impl Iterator<Item = MemoryReference> {
        let (first, second) = match *self {
            Self::Single(r) => (r, None),
            Self::Pair { lower, upper } => (lower, Some(upper)),
        };
        std::iter::once(first).chain(second)
    }
}

/// Splits `reference` at the line boundary below its last byte.
///
/// The upper part is computed first: it starts at the base of the line holding the last
/// byte and runs to the end of the reference. The lower part keeps the original address
/// and covers the remainder. Both keep the original access kind. A reference spanning
/// more than two lines still yields exactly two parts.
///
/// # Arguments
///
/// * `reference` - Reference from the trace.
/// * `line_size` - Line size in bytes (power of two).
pub fn split_reference(reference: &MemoryReference, line_size: u64) -> Split {
    let first_line = line_base_address(reference.address, line_size);
    let last_line = line_base_address(reference.last_byte(), line_size);
    if first_line == last_line {
        return Split::Single(*reference);
    }
    let upper_length = reference.end() - last_line;
    let upper = MemoryReference::new(reference.kind, last_line, upper_length);
    let lower = MemoryReference::new(
        reference.kind,
        reference.address,
        reference.length - upper_length,
    );
    Split::Pair { lower, upper }
}
