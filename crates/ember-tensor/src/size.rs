//! Element counts and byte counts.

use ember_core::{ElementType, TypeError};

/// Number of elements described by `shape`.
///
/// An empty shape is a scalar and has one element. Negative extents and
/// products that overflow `usize` are rejected rather than wrapped.
pub fn element_count(shape: &[i32]) -> Result<usize, TypeError> {
    shape
        .iter()
        .enumerate()
        .try_fold(1usize, |count, (index, &value)| {
            let extent =
                usize::try_from(value).map_err(|_| TypeError::NegativeDimension { index, value })?;
            count
                .checked_mul(extent)
                .ok_or(TypeError::ElementCountOverflow)
        })
}

/// Bytes needed for `elements` values of `element_type`.
///
/// Returns `(total_bytes, type_width)`. Unsupported types fail with the same
/// [`TypeError::Unsupported`] that [`ElementType::size_of`] produces.
pub fn bytes_required(
    elements: usize,
    element_type: ElementType,
) -> Result<(usize, usize), TypeError> {
    let width = element_type.size_of()?;
    let total = elements
        .checked_mul(width)
        .ok_or(TypeError::ByteCountOverflow { elements, width })?;
    Ok((total, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_shape_is_scalar() {
        assert_eq!(element_count(&[]), Ok(1));
    }

    #[test]
    fn product_of_dimensions() {
        assert_eq!(element_count(&[2, 3]), Ok(6));
        assert_eq!(element_count(&[1, 28, 28, 3]), Ok(2352));
        assert_eq!(element_count(&[4, 0, 2]), Ok(0));
    }

    #[test]
    fn negative_dimension_is_rejected() {
        assert_eq!(
            element_count(&[2, -1]),
            Err(TypeError::NegativeDimension {
                index: 1,
                value: -1
            })
        );
    }

    #[test]
    fn overflowing_product_is_rejected() {
        let shape = [i32::MAX; 4];
        assert_eq!(element_count(&shape), Err(TypeError::ElementCountOverflow));
    }

    #[test]
    fn bytes_for_float_matrix() {
        assert_eq!(bytes_required(6, ElementType::Float32), Ok((24, 4)));
        assert_eq!(bytes_required(6, ElementType::Complex64), Ok((48, 8)));
        assert_eq!(bytes_required(0, ElementType::Int8), Ok((0, 1)));
    }

    #[test]
    fn bytes_propagate_unsupported_type() {
        assert_eq!(
            bytes_required(6, ElementType::String),
            Err(TypeError::Unsupported {
                name: "STRING",
                code: 5
            })
        );
    }

    #[test]
    fn byte_overflow_is_rejected() {
        assert_eq!(
            bytes_required(usize::MAX, ElementType::Int64),
            Err(TypeError::ByteCountOverflow {
                elements: usize::MAX,
                width: 8
            })
        );
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_supported() -> impl Strategy<Value = ElementType> {
            prop_oneof![
                Just(ElementType::Float32),
                Just(ElementType::Int16),
                Just(ElementType::Int32),
                Just(ElementType::Int64),
                Just(ElementType::Int8),
                Just(ElementType::UInt8),
                Just(ElementType::Bool),
                Just(ElementType::Complex64),
            ]
        }

        proptest! {
            #[test]
            fn bytes_equal_shape_product_times_width(
                shape in prop::collection::vec(0i32..16, 0..5),
                ty in arb_supported(),
            ) {
                let count = element_count(&shape).unwrap();
                let expected: usize = shape.iter().map(|&d| d as usize).product();
                let (bytes, width) = bytes_required(count, ty).unwrap();
                prop_assert_eq!(width, ty.size_of().unwrap());
                prop_assert_eq!(bytes, expected * width);
            }

            #[test]
            fn scaling_one_dimension_scales_bytes(
                shape in prop::collection::vec(1i32..16, 1..5),
                pick in any::<prop::sample::Index>(),
                k in 1i32..8,
                ty in arb_supported(),
            ) {
                let (base, _) = bytes_required(element_count(&shape).unwrap(), ty).unwrap();
                let mut scaled = shape.clone();
                let i = pick.index(scaled.len());
                scaled[i] *= k;
                let (grown, _) = bytes_required(element_count(&scaled).unwrap(), ty).unwrap();
                prop_assert_eq!(grown, base * k as usize);
            }
        }
    }
}
