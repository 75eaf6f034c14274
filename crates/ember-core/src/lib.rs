//! Core types and traits for the Ember tensor arena allocator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the arena and the tensor materializer:
//! element types, quantization parameters, id newtypes, the
//! descriptor/buffer-pool views handed over by a model parser, and the
//! error-reporting capability.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod error;
pub mod id;
pub mod quant;
pub mod traits;

pub use element::{ElementType, SchemaType};
pub use error::TypeError;
pub use id::{BufferHandle, BufferIndex, DelegateId, Shape, TensorIndex};
pub use quant::{QuantizationParams, QuantizationView, ZeroPointEncoding};
pub use traits::{BufferSource, ErrorReporter, TensorSource};
