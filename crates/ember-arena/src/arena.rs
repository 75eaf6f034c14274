//! The fixed-capacity bump arena.
//!
//! An [`Arena`] owns one contiguous byte buffer and a cursor that only moves
//! forward. Every allocation is carved from the current cursor, padded so its
//! start *address* (not merely its offset) meets the requested alignment, and
//! committed atomically: either the cursor advances by the padded size or
//! nothing changes. There is no free, reset, or compaction; regions stay
//! valid until the arena is dropped as a unit.
//!
//! The arena is not synchronised. Callers that share one across threads must
//! serialise access themselves, which `&mut self` already enforces in safe
//! code.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::align::align_up;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::ArenaRegion;

/// Backing storage an [`Arena`] can carve from.
///
/// Implemented for every type that dereferences mutably to a byte slice.
/// Implementors must keep the slice at a fixed address when moved.
pub trait ArenaStorage: Deref<Target = [u8]> + DerefMut {}

impl<T> ArenaStorage for T where T: Deref<Target = [u8]> + DerefMut {}

/// A bump allocator over a single fixed-size byte buffer.
///
/// `S` is the backing storage. It must dereference to a byte slice whose
/// address does not change when the arena is moved (`Box<[u8]>`, `Vec<u8>`,
/// or a borrowed `&mut [u8]`), because alignment is computed against real
/// addresses.
pub struct Arena<S = Box<[u8]>> {
    /// Backing storage. Its length is the arena capacity.
    storage: S,
    /// Bytes consumed so far, padding included.
    used: usize,
    /// Number of committed allocations.
    allocations: usize,
    /// Zero each region before returning it.
    zero_fill: bool,
}

impl Arena {
    /// Create an owned, zero-initialised arena.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let storage = vec![0u8; config.capacity].into_boxed_slice();
        Ok(Self::from_storage(storage, config.zero_fill))
    }

    /// Create an owned arena of `capacity` bytes with default settings.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::new(ArenaConfig::new(capacity))
    }
}

impl<S: ArenaStorage> Arena<S> {
    /// Wrap caller-supplied storage.
    ///
    /// The storage length becomes the capacity. With `zero_fill`, each region
    /// is cleared on allocation; otherwise it holds whatever bytes the
    /// storage held.
    pub fn from_storage(storage: S, zero_fill: bool) -> Self {
        Self {
            storage,
            used: 0,
            allocations: 0,
            zero_fill,
        }
    }

    /// Allocate `size` bytes whose start address is a multiple of `align`.
    ///
    /// The padded size consumed is `aligned_address + size - cursor`. The
    /// allocation commits only if the padded size fits in the remaining
    /// capacity; on failure the arena is unchanged. Zero-byte requests
    /// succeed and consume only alignment padding.
    pub fn allocate(&mut self, size: usize, align: usize) -> Result<ArenaRegion, ArenaError> {
        if !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment { align });
        }

        let cursor = self.base() + self.used;
        let padded = align_up(cursor, align)
            .and_then(|aligned| (aligned - cursor).checked_add(size))
            .and_then(|padded| self.used.checked_add(padded).map(|next| (padded, next)));

        let (padded, next_used) = match padded {
            Some((padded, next)) if next <= self.capacity() => (padded, next),
            _ => {
                tracing::debug!(
                    requested = size,
                    align,
                    remaining = self.remaining(),
                    "arena allocation rejected"
                );
                return Err(ArenaError::Exhausted {
                    requested: size,
                    remaining: self.remaining(),
                });
            }
        };

        let offset = self.used + (padded - size);
        self.used = next_used;
        self.allocations += 1;
        if self.zero_fill {
            self.storage[offset..offset + size].fill(0);
        }
        tracing::trace!(offset, size, align, used = self.used, "arena allocation committed");
        Ok(ArenaRegion::new(self.base(), offset, size, align))
    }

    /// Shared view of a region's bytes.
    ///
    /// Returns `None` unless [`Arena::contains`] holds for `region`.
    pub fn bytes(&self, region: ArenaRegion) -> Option<&[u8]> {
        if !self.contains(region) {
            return None;
        }
        self.storage.get(region.offset..region.end())
    }

    /// Mutable view of a region's bytes.
    ///
    /// Returns `None` unless [`Arena::contains`] holds for `region`.
    pub fn bytes_mut(&mut self, region: ArenaRegion) -> Option<&mut [u8]> {
        if !self.contains(region) {
            return None;
        }
        self.storage.get_mut(region.offset..region.end())
    }

    /// Whether `region` was handed out by this arena and lies inside its
    /// committed space.
    ///
    /// Ownership is checked by storage address, so a region from another
    /// live arena is rejected even when its offsets are in bounds here.
    pub fn contains(&self, region: ArenaRegion) -> bool {
        region.base == self.base()
            && region
                .offset
                .checked_add(region.len)
                .is_some_and(|end| end <= self.used)
    }

    /// Absolute start address of a region, for handing to kernels.
    pub fn address_of(&self, region: ArenaRegion) -> usize {
        self.base() + region.offset
    }

    fn base(&self) -> usize {
        self.storage.as_ptr() as usize
    }

    /// Bytes consumed so far, padding included.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Remaining headroom in bytes.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.used
    }

    /// Number of committed allocations.
    pub fn allocation_count(&self) -> usize {
        self.allocations
    }

    /// Point-in-time usage summary.
    pub fn usage(&self) -> ArenaUsage {
        ArenaUsage {
            used: self.used,
            capacity: self.capacity(),
            allocations: self.allocations,
        }
    }
}

impl<S: ArenaStorage> fmt::Debug for Arena<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("used", &self.used)
            .field("capacity", &self.capacity())
            .field("allocations", &self.allocations)
            .field("zero_fill", &self.zero_fill)
            .finish()
    }
}

/// Snapshot of arena consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaUsage {
    /// Bytes consumed, padding included.
    pub used: usize,
    /// Total capacity in bytes.
    pub capacity: usize,
    /// Number of committed allocations.
    pub allocations: usize,
}

impl ArenaUsage {
    /// Remaining headroom in bytes.
    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }
}

impl fmt::Display for ArenaUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} bytes in {} allocations",
            self.used, self.capacity, self.allocations
        )
    }
}
