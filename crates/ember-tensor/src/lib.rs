//! Tensor materialization for the Ember arena allocator.
//!
//! Given one serialized tensor descriptor, the model's constant-buffer pool
//! and an [`ember_arena::Arena`], [`materialize_tensor`] produces a
//! [`TensorRecord`] ready for execution:
//!
//! ```text
//! descriptor ──► element type ──► width
//!      │
//!      ├─ constant buffer non-empty ──► ConstantAlias (no arena payload)
//!      └─ otherwise ──► CallerProvided | ArenaOwned(allocate(bytes, width))
//!      │
//!      ├─ DimsArray::allocate(shape)        (always from the arena)
//!      └─ QuantizationParams::from_view     (first scale, host-order zero point)
//! ```
//!
//! [`ModelLoader`] runs this over a whole tensor list and stops at the first
//! failure.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dims;
pub mod error;
pub mod loader;
pub mod materialize;
pub mod record;
pub mod report;
pub mod size;

pub use dims::DimsArray;
pub use error::{AllocationPurpose, LoadError, MaterializeError};
pub use loader::ModelLoader;
pub use materialize::materialize_tensor;
pub use record::{AllocationKind, TensorData, TensorRecord, UNNAMED_TENSOR};
pub use report::TracingReporter;
pub use size::{bytes_required, element_count};
