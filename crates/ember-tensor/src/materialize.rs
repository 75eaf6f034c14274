//! Turning one serialized tensor descriptor into a [`TensorRecord`].
//!
//! The decision is between two ownership modes:
//!
//! - the descriptor's buffer holds non-empty constant bytes, so the record
//!   aliases them read-only and the arena is untouched for the payload;
//! - otherwise the payload is writable memory, either the caller's
//!   pre-allocated block or a fresh arena region sized from the shape.
//!
//! Either way the dimensions array comes from the arena. Every failure is
//! reported, then returned; no partially filled record ever escapes.

use ember_arena::{Arena, ArenaStorage};
use ember_core::{
    BufferSource, ElementType, ErrorReporter, QuantizationParams, TensorSource,
};

use crate::dims::DimsArray;
use crate::error::{AllocationPurpose, MaterializeError};
use crate::record::{TensorData, TensorRecord, UNNAMED_TENSOR};
use crate::report::report_failure;
use crate::size::{bytes_required, element_count};

/// Materialize one tensor.
///
/// `buffers` is the model's constant-buffer pool. `preallocated`, when
/// given, is used verbatim as the writable payload; its length is not
/// checked against the tensor size. A constant buffer takes precedence over
/// `preallocated`.
///
/// The only shared state touched is the arena cursor. Allocations committed
/// before a later step fails stay committed; the arena has no rollback.
pub fn materialize_tensor<'m, 'b, 't, T, B, R, S>(
    tensor: T,
    buffers: &B,
    arena: &mut Arena<S>,
    reporter: &mut R,
    preallocated: Option<&'m mut [u8]>,
) -> Result<TensorRecord<'m>, MaterializeError>
where
    'b: 'm,
    't: 'm,
    T: TensorSource<'t>,
    B: BufferSource<'b> + ?Sized,
    R: ErrorReporter + ?Sized,
    S: ArenaStorage,
{
    let name: &'m str = tensor.name().unwrap_or(UNNAMED_TENSOR);
    let fail = |reporter: &mut R, err: MaterializeError| report_failure(reporter, name, err);

    let element_type = ElementType::from_schema_tag(tensor.type_tag())
        .and_then(|ty| ty.size_of().map(|_| ty))
        .map_err(|err| fail(reporter, err.into()))?;

    let (data, bytes): (TensorData<'m>, usize) = match buffers
        .buffer_data(tensor.buffer())
        .filter(|raw| !raw.is_empty())
    {
        Some(raw) => {
            // Sized from the buffer itself, independently of the shape.
            let (bytes, _) =
                bytes_required(raw.len(), element_type).map_err(|err| fail(reporter, err.into()))?;
            (TensorData::ConstantAlias(raw), bytes)
        }
        None => {
            let (bytes, width) = element_count(tensor.shape())
                .and_then(|count| bytes_required(count, element_type))
                .map_err(|err| fail(reporter, err.into()))?;
            let data = match preallocated {
                Some(block) => TensorData::CallerProvided(block),
                None => {
                    let region = arena.allocate(bytes, width).map_err(|err| {
                        fail(
                            reporter,
                            MaterializeError::from_arena(AllocationPurpose::Payload, err),
                        )
                    })?;
                    TensorData::ArenaOwned(region)
                }
            };
            (data, bytes)
        }
    };

    let dims = DimsArray::allocate(arena, tensor.shape())
        .map_err(|err| fail(reporter, MaterializeError::from_arena(AllocationPurpose::Dims, err)))?;

    let quantization = QuantizationParams::from_view(tensor.quantization().as_ref());

    tracing::trace!(
        tensor = name,
        element_type = element_type.name(),
        bytes,
        allocation = ?data.allocation_kind(),
        "tensor materialized"
    );

    Ok(TensorRecord {
        element_type,
        bytes,
        dims,
        data,
        quantization,
        name,
        is_variable: tensor.is_variable(),
        delegate: None,
        buffer_handle: None,
        data_is_stale: false,
    })
}
