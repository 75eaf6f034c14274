//! Seams to the collaborators around the allocator: the model parser's
//! descriptor and buffer-pool views, and the error-reporting sink.

use std::fmt;

use crate::id::BufferIndex;
use crate::quant::QuantizationView;

/// Read-only view of one serialized tensor descriptor.
///
/// Implemented by the model parser. `'m` is the lifetime of the serialized
/// model; borrowed names outlive the materialized records that point at them.
pub trait TensorSource<'m> {
    /// Raw schema type tag (see [`crate::SchemaType`]).
    fn type_tag(&self) -> u8;

    /// Declared shape in declaration order. Empty means scalar.
    fn shape(&self) -> &[i32];

    /// Index of the constant buffer this tensor references.
    fn buffer(&self) -> BufferIndex;

    /// Quantization block, if the descriptor carries one.
    fn quantization(&self) -> Option<QuantizationView<'_>>;

    /// Declared name, if any.
    fn name(&self) -> Option<&'m str>;

    /// Whether the tensor is mutated across inference runs.
    fn is_variable(&self) -> bool;
}

/// The model's shared constant-buffer pool.
pub trait BufferSource<'m> {
    /// Raw bytes of buffer `index`.
    ///
    /// Returns `None` when the index is out of range, the entry is null, or
    /// the entry carries no byte array.
    fn buffer_data(&self, index: BufferIndex) -> Option<&'m [u8]>;
}

impl<'m> BufferSource<'m> for [Option<&'m [u8]>] {
    fn buffer_data(&self, index: BufferIndex) -> Option<&'m [u8]> {
        self.get(index.0 as usize).copied().flatten()
    }
}

impl<'m> BufferSource<'m> for [&'m [u8]] {
    fn buffer_data(&self, index: BufferIndex) -> Option<&'m [u8]> {
        self.get(index.0 as usize).copied()
    }
}

/// Sink for formatted diagnostics.
///
/// Invoked once before every failure return. A reporter cannot influence
/// control flow: the failure is returned whatever the reporter does.
pub trait ErrorReporter {
    /// Record one formatted message.
    fn report(&mut self, args: fmt::Arguments<'_>);
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &mut R {
    fn report(&mut self, args: fmt::Arguments<'_>) {
        (**self).report(args);
    }
}
