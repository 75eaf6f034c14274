//! Error types for element-type resolution and shape arithmetic.

use thiserror::Error;

/// Errors raised while resolving an element type or sizing a tensor.
///
/// Each variant is fatal to the tensor being materialized; nothing here is
/// recovered locally.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The serialized type tag does not name any known schema type.
    #[error("schema type tag {tag} is not recognised")]
    UnknownSchemaType {
        /// The raw tag read from the descriptor.
        tag: u8,
    },
    /// The element type is known but has no fixed byte width.
    #[error("type {name} ({code}) is not supported")]
    Unsupported {
        /// Symbolic name of the type, e.g. `"STRING"`.
        name: &'static str,
        /// Numeric runtime type code.
        code: i32,
    },
    /// A shape dimension was negative.
    #[error("dimension {index} has negative extent {value}")]
    NegativeDimension {
        /// Position of the offending dimension.
        index: usize,
        /// The declared extent.
        value: i32,
    },
    /// The product of the shape dimensions does not fit in `usize`.
    #[error("element count overflows usize")]
    ElementCountOverflow,
    /// `element_count * type_width` does not fit in `usize`.
    #[error("byte count for {elements} elements of width {width} overflows usize")]
    ByteCountOverflow {
        /// Number of elements requested.
        elements: usize,
        /// Width of one element in bytes.
        width: usize,
    },
}
