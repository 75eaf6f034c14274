//! Benchmark model profiles for the Ember tensor arena allocator.
//!
//! Provides pre-built [`ModelFixture`] profiles for benchmarking:
//!
//! - [`reference_model`]: a dense stack with constant weights and arena-backed activations
//! - [`activations_only`]: the same stack with every tensor writable
//! - [`arena_bytes_for`]: an arena size that comfortably holds a profile

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ember_core::{SchemaType, ZeroPointEncoding};
use ember_test_utils::{ModelFixture, TensorDef};

/// Width of every hidden layer in the reference profiles.
pub const HIDDEN: i32 = 64;

/// Build a reference model of `layers` dense layers.
///
/// Per layer: int8 weights `[HIDDEN, HIDDEN]` and int32 bias `[HIDDEN]`
/// backed by constant buffers, plus a quantized int8 activation
/// `[1, HIDDEN]` that needs arena memory. Tensor count is `3 * layers + 1`.
pub fn reference_model(layers: usize) -> ModelFixture {
    let mut model = ModelFixture::new();
    model.push_tensor(activation("input"));
    for layer in 0..layers {
        let weights = model.push_buffer(vec![1u8; (HIDDEN * HIDDEN) as usize]);
        let bias = model.push_buffer(vec![0u8; HIDDEN as usize * 4]);
        model.push_tensor(
            TensorDef::new(SchemaType::Int8, &[HIDDEN, HIDDEN])
                .named(format!("dense_{layer}/weights"))
                .with_buffer(weights),
        );
        model.push_tensor(
            TensorDef::new(SchemaType::Int32, &[HIDDEN])
                .named(format!("dense_{layer}/bias"))
                .with_buffer(bias),
        );
        model.push_tensor(activation(&format!("dense_{layer}/out")));
    }
    model
}

/// Build `count` float32 `[1, HIDDEN]` tensors with no constant data.
pub fn activations_only(count: usize) -> ModelFixture {
    let mut model = ModelFixture::new();
    for i in 0..count {
        model.push_tensor(
            TensorDef::new(SchemaType::Float32, &[1, HIDDEN]).named(format!("act_{i}")),
        );
    }
    model
}

/// Arena bytes sufficient for `tensors` writable float32 `[1, HIDDEN]`
/// tensors, padding and dims arrays included.
pub fn arena_bytes_for(tensors: usize) -> usize {
    let payload = HIDDEN as usize * 4;
    let dims = 3 * 4;
    tensors * (payload + dims + 8)
}

fn activation(name: &str) -> TensorDef {
    TensorDef::new(SchemaType::Int8, &[1, HIDDEN])
        .named(name)
        .quantized(0.05, -128, ZeroPointEncoding::Little)
}
