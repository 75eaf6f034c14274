//! The runtime tensor record produced by materialization.

use ember_arena::{Arena, ArenaRegion, ArenaStorage};
use ember_core::{BufferHandle, DelegateId, ElementType, QuantizationParams};

use crate::dims::DimsArray;

/// Name given to tensors whose descriptor declares none.
pub const UNNAMED_TENSOR: &str = "<No name>";

/// Where a tensor's data lives.
///
/// Exactly one ownership mode applies per tensor, so there is no separate
/// "is this pointer owned" flag to keep in sync.
#[derive(Debug, PartialEq, Eq)]
pub enum TensorData<'m> {
    /// Read-only bytes inside the model's constant-buffer pool.
    ConstantAlias(&'m [u8]),
    /// Writable memory carved from the arena.
    ArenaOwned(ArenaRegion),
    /// Writable memory the caller allocated up front.
    CallerProvided(&'m mut [u8]),
}

impl TensorData<'_> {
    /// The allocation tag matching this ownership mode.
    pub fn allocation_kind(&self) -> AllocationKind {
        match self {
            Self::ConstantAlias(_) => AllocationKind::MmapReadOnly,
            Self::ArenaOwned(_) | Self::CallerProvided(_) => AllocationKind::ArenaReadWrite,
        }
    }
}

/// How the execution engine may treat a tensor's memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AllocationKind {
    /// Memory-mapped, read-only constant data.
    MmapReadOnly,
    /// Writable scratch memory valid for the arena's lifetime.
    ArenaReadWrite,
}

/// A live tensor ready for execution.
///
/// `'m` ties the record to the serialized model (aliased constant data and
/// the name) and to any caller-provided payload block. Arena-backed data and
/// the dimensions array are reached through the arena that produced them.
#[derive(Debug)]
pub struct TensorRecord<'m> {
    /// Runtime element type.
    pub element_type: ElementType,
    /// Payload length in bytes.
    pub bytes: usize,
    /// Arena-resident dimensions array.
    pub dims: DimsArray,
    /// The payload.
    pub data: TensorData<'m>,
    /// Scale and zero point; zero when the tensor is not quantized.
    pub quantization: QuantizationParams,
    /// Declared name or [`UNNAMED_TENSOR`].
    pub name: &'m str,
    /// Whether the tensor is mutated across inference runs.
    pub is_variable: bool,
    /// Delegate owning the data. Always `None` after materialization.
    pub delegate: Option<DelegateId>,
    /// Delegate buffer handle. Always `None` after materialization.
    pub buffer_handle: Option<BufferHandle>,
    /// Whether a delegate copy is newer than `data`.
    pub data_is_stale: bool,
}

impl<'m> TensorRecord<'m> {
    /// The allocation tag for this record's data.
    pub fn allocation_kind(&self) -> AllocationKind {
        self.data.allocation_kind()
    }

    /// Read access to the payload bytes.
    ///
    /// Arena-owned payloads are resolved through `arena`, and yield `None`
    /// when `arena` is not the one that materialized this record.
    pub fn data_bytes<'a, S: ArenaStorage>(&'a self, arena: &'a Arena<S>) -> Option<&'a [u8]> {
        match &self.data {
            TensorData::ConstantAlias(bytes) => Some(*bytes),
            TensorData::ArenaOwned(region) => arena.bytes(*region),
            TensorData::CallerProvided(bytes) => Some(&**bytes),
        }
    }

    /// Write access to the payload bytes.
    ///
    /// Constant aliases are read-only and yield `None`.
    pub fn data_bytes_mut<'a, S: ArenaStorage>(
        &'a mut self,
        arena: &'a mut Arena<S>,
    ) -> Option<&'a mut [u8]> {
        match &mut self.data {
            TensorData::ConstantAlias(_) => None,
            TensorData::ArenaOwned(region) => arena.bytes_mut(*region),
            TensorData::CallerProvided(bytes) => Some(&mut **bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_kind_follows_data() {
        let constant: &[u8] = &[1, 2, 3];
        assert_eq!(
            TensorData::ConstantAlias(constant).allocation_kind(),
            AllocationKind::MmapReadOnly
        );
        let mut block = [0u8; 4];
        assert_eq!(
            TensorData::CallerProvided(&mut block).allocation_kind(),
            AllocationKind::ArenaReadWrite
        );
    }
}
