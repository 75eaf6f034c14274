//! Region handles into an arena.
//!
//! An [`ArenaRegion`] records where an allocation lives inside its arena as
//! an offset and length, tagged with the arena's base address. It holds no
//! borrow, so any number of tensor records can keep regions while the arena
//! continues to hand out new ones.

use std::fmt;

/// Location of a committed allocation within an [`crate::Arena`].
///
/// Regions are created only by the arena and are never invalidated or
/// moved; they stay valid for the arena's whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArenaRegion {
    /// Base address of the owning arena's storage.
    pub(crate) base: usize,
    /// Byte offset from the start of the arena storage.
    pub(crate) offset: usize,
    /// Length of the allocation in bytes.
    pub(crate) len: usize,
    /// Alignment the region's start address satisfies.
    pub(crate) align: usize,
}

impl ArenaRegion {
    pub(crate) fn new(base: usize, offset: usize, len: usize, align: usize) -> Self {
        Self {
            base,
            offset,
            len,
            align,
        }
    }

    /// Byte offset from the start of the arena storage.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Alignment of the region's start address.
    pub fn align(&self) -> usize {
        self.align
    }

    /// One past the last byte of the region.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Whether the two regions share any byte of the same arena.
    pub fn overlaps(&self, other: &ArenaRegion) -> bool {
        self.base == other.base
            && !self.is_empty()
            && !other.is_empty()
            && self.offset < other.end()
            && other.offset < self.end()
    }
}

impl fmt::Display for ArenaRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArenaRegion(off={}, len={}, align={})",
            self.offset, self.len, self.align
        )
    }
}
