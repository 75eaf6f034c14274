//! Arena-resident dimensions arrays.
//!
//! A dimensions array is `rank + 1` native-endian `i32` slots: slot 0 holds
//! the rank, the rest hold the extents in declaration order. It is allocated
//! from the same arena as tensor payloads and aligned to `i32`.

use ember_arena::{Arena, ArenaError, ArenaRegion, ArenaStorage};
use ember_core::Shape;

const SLOT: usize = std::mem::size_of::<i32>();

/// Handle to a dimensions array inside an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimsArray {
    region: ArenaRegion,
    rank: usize,
}

impl DimsArray {
    /// Allocate and populate a dimensions array for `shape`.
    ///
    /// Fails without writing anything if the arena cannot hold the array.
    pub fn allocate<S: ArenaStorage>(
        arena: &mut Arena<S>,
        shape: &[i32],
    ) -> Result<Self, ArenaError> {
        let rank = shape.len();
        let size = rank
            .checked_add(1)
            .and_then(|slots| slots.checked_mul(SLOT))
            .ok_or(ArenaError::Exhausted {
                requested: usize::MAX,
                remaining: arena.remaining(),
            })?;
        let rank_slot = i32::try_from(rank).map_err(|_| ArenaError::Exhausted {
            requested: size,
            remaining: arena.remaining(),
        })?;

        let region = arena.allocate(size, std::mem::align_of::<i32>())?;
        if let Some(bytes) = arena.bytes_mut(region) {
            let values = std::iter::once(rank_slot).chain(shape.iter().copied());
            for (slot, value) in bytes.chunks_exact_mut(SLOT).zip(values) {
                slot.copy_from_slice(&value.to_ne_bytes());
            }
        }
        Ok(Self { region, rank })
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The arena region holding the array, count slot included.
    pub fn region(&self) -> ArenaRegion {
        self.region
    }

    /// The count stored in slot 0.
    pub fn size<S: ArenaStorage>(&self, arena: &Arena<S>) -> Option<i32> {
        self.slot(arena, 0)
    }

    /// Extent of dimension `index`.
    pub fn get<S: ArenaStorage>(&self, arena: &Arena<S>, index: usize) -> Option<i32> {
        if index >= self.rank {
            return None;
        }
        self.slot(arena, index + 1)
    }

    /// Extents in declaration order.
    pub fn iter<'a, S: ArenaStorage>(
        &self,
        arena: &'a Arena<S>,
    ) -> impl Iterator<Item = i32> + 'a {
        arena
            .bytes(self.region)
            .unwrap_or_default()
            .chunks_exact(SLOT)
            .skip(1)
            .map(|c| i32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
    }

    /// Copy the extents out as a [`Shape`].
    pub fn to_shape<S: ArenaStorage>(&self, arena: &Arena<S>) -> Shape {
        self.iter(arena).collect()
    }

    fn slot<S: ArenaStorage>(&self, arena: &Arena<S>, slot: usize) -> Option<i32> {
        let start = slot * SLOT;
        let bytes = arena.bytes(self.region)?.get(start..start + SLOT)?;
        Some(i32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
