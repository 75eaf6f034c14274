//! Strongly-typed identifiers and the [`Shape`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Index of a tensor within a model's tensor list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TensorIndex(pub u32);

impl fmt::Display for TensorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TensorIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Index into a model's constant-buffer pool.
///
/// By convention buffer 0 is the empty sentinel buffer, so tensors without
/// constant data usually reference it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferIndex(pub u32);

impl fmt::Display for BufferIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BufferIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a delegate that has taken ownership of a tensor's data.
///
/// Freshly materialized tensors never carry one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DelegateId(pub u32);

impl fmt::Display for DelegateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to a delegate-managed buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub i32);

impl fmt::Display for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tensor shape in declaration order.
///
/// Uses `SmallVec<[i32; 4]>` so the common NHWC rank-4 case stays inline.
/// Higher ranks spill to the heap transparently.
pub type Shape = SmallVec<[i32; 4]>;
