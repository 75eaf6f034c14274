//! Ember: an arena tensor allocator for memory-constrained inference.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Ember sub-crates. For most users, adding `ember` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ember::prelude::*;
//!
//! // A minimal descriptor: a float32 activation with no constant data.
//! struct Activation;
//! impl<'m> TensorSource<'m> for Activation {
//!     fn type_tag(&self) -> u8 { SchemaType::Float32.tag() }
//!     fn shape(&self) -> &[i32] { &[2, 3] }
//!     fn buffer(&self) -> BufferIndex { BufferIndex(0) }
//!     fn quantization(&self) -> Option<QuantizationView<'_>> { None }
//!     fn name(&self) -> Option<&'m str> { Some("activation") }
//!     fn is_variable(&self) -> bool { false }
//! }
//!
//! // Buffer 0 is the empty sentinel every serialized model carries.
//! let pool: [&[u8]; 1] = [&[]];
//! let mut arena = Arena::new(ArenaConfig::new(1024)).unwrap();
//! let mut reporter = TracingReporter;
//!
//! let record =
//!     materialize_tensor(Activation, &pool[..], &mut arena, &mut reporter, None).unwrap();
//! assert_eq!(record.element_type, ElementType::Float32);
//! assert_eq!(record.bytes, 24);
//! assert_eq!(record.allocation_kind(), AllocationKind::ArenaReadWrite);
//! assert_eq!(record.dims.to_shape(&arena).as_slice(), &[2, 3]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `ember-arena` | Bump arena, alignment helpers, `ArenaConfig` |
//! | [`types`] | `ember-core` | IDs, element types, quantization, core traits |
//! | [`tensor`] | `ember-tensor` | Materialization, tensor records, model loader |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Fixed-capacity bump arena (`ember-arena`).
///
/// Most users only need [`arena::Arena`] and [`arena::ArenaConfig`], which
/// are also in the [`prelude`].
pub use ember_arena as arena;

/// Core types, traits, and IDs (`ember-core`).
///
/// Contains the schema and runtime element type tables, quantization
/// decoding, and the collaborator traits ([`types::TensorSource`],
/// [`types::BufferSource`], [`types::ErrorReporter`]).
pub use ember_core as types;

/// Tensor materialization (`ember-tensor`).
///
/// [`tensor::materialize_tensor`] for one descriptor,
/// [`tensor::ModelLoader`] for a whole tensor list.
pub use ember_tensor as tensor;

/// Common imports for typical Ember usage.
///
/// ```rust
/// use ember::prelude::*;
/// ```
pub mod prelude {
    // Arena
    pub use ember_arena::{Arena, ArenaConfig, ArenaError, ArenaRegion, ArenaUsage};

    // Core types and traits
    pub use ember_core::{
        BufferIndex, BufferSource, ElementType, ErrorReporter, QuantizationParams,
        QuantizationView, SchemaType, TensorIndex, TensorSource, TypeError, ZeroPointEncoding,
    };

    // Materialization
    pub use ember_tensor::{
        materialize_tensor, AllocationKind, LoadError, MaterializeError, ModelLoader,
        TensorData, TensorRecord, TracingReporter,
    };
}
