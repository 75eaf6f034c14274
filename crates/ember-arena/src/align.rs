//! Address alignment.

/// Round `addr` up to the next multiple of `align`.
///
/// Operates on the address bit pattern, never on memory. Returns `None` when
/// `align` is not a power of two or the rounded address would not fit in
/// `usize`.
#[inline]
pub fn align_up(addr: usize, align: usize) -> Option<usize> {
    if !align.is_power_of_two() {
        return None;
    }
    let mask = align - 1;
    addr.checked_add(mask).map(|bumped| bumped & !mask)
}

/// Whether `addr` is a multiple of `align`.
#[inline]
pub fn is_aligned(addr: usize, align: usize) -> bool {
    align.is_power_of_two() && addr & (align - 1) == 0
}
