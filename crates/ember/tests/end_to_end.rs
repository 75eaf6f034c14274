//! End-to-end materialization scenarios through the facade crate.

use ember::prelude::*;
use ember::tensor::AllocationPurpose;
use ember_test_utils::{ModelFixture, RecordingReporter, TensorDef};

fn float_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}

#[test]
fn float_activation_is_carved_aligned_from_the_arena() {
    let mut model = ModelFixture::new();
    model.push_tensor(TensorDef::new(SchemaType::Float32, &[2, 3]).named("act"));
    let pool = model.pool();
    let def = model.tensors().next().unwrap();

    let mut arena = Arena::with_capacity(1024).unwrap();
    let mut reporter = RecordingReporter::new();
    let record = materialize_tensor(def, &pool[..], &mut arena, &mut reporter, None).unwrap();

    assert_eq!(record.element_type, ElementType::Float32);
    assert_eq!(record.bytes, 24);
    assert_eq!(record.name, "act");
    assert_eq!(record.allocation_kind(), AllocationKind::ArenaReadWrite);

    let TensorData::ArenaOwned(region) = &record.data else {
        panic!("expected arena-owned data, got {:?}", record.data);
    };
    assert_eq!(region.len(), 24);
    assert_eq!(arena.address_of(*region) % 4, 0);
    assert_eq!(arena.address_of(record.dims.region()) % 4, 0);
    assert!(!region.overlaps(&record.dims.region()));

    // Payload plus a 3-slot dims array, padding aside.
    assert!(arena.used() >= 24 + 12);
    assert_eq!(arena.allocation_count(), 2);
    assert_eq!(record.dims.size(&arena), Some(2));
    assert_eq!(record.dims.to_shape(&arena).as_slice(), &[2, 3]);
    assert!(reporter.is_empty());
}

#[test]
fn exhausted_arena_reports_and_leaves_cursor_in_place() {
    let mut model = ModelFixture::new();
    model.push_tensor(TensorDef::new(SchemaType::Float32, &[2, 3]).named("act"));
    let pool = model.pool();
    let def = model.tensors().next().unwrap();

    let mut arena = Arena::with_capacity(1024).unwrap();
    let filler = arena.remaining() - 10;
    arena.allocate(filler, 1).unwrap();
    assert_eq!(arena.remaining(), 10);
    let before = arena.usage();

    let mut reporter = RecordingReporter::new();
    let err = materialize_tensor(def, &pool[..], &mut arena, &mut reporter, None).unwrap_err();

    assert_eq!(
        err,
        MaterializeError::ArenaExhausted {
            purpose: AllocationPurpose::Payload,
            requested: 24,
            available: 10,
        }
    );
    assert_eq!(arena.usage(), before);
    assert_eq!(
        reporter.messages(),
        &["tensor 'act': couldn't allocate data memory, wanted 24 bytes but only 10 were available"
            .to_string()]
    );
}

#[test]
fn constant_buffer_wins_over_preallocated_block() {
    let mut model = ModelFixture::new();
    let weights = model.push_buffer(float_bytes(&[1.0, 2.0, 3.0, 4.0]));
    model.push_tensor(
        TensorDef::new(SchemaType::Float32, &[4])
            .named("weights")
            .with_buffer(weights),
    );
    let pool = model.pool();
    let def = model.tensors().next().unwrap();

    let mut arena = Arena::with_capacity(256).unwrap();
    let mut reporter = RecordingReporter::new();
    let mut block = [0u8; 16];
    let record =
        materialize_tensor(def, &pool[..], &mut arena, &mut reporter, Some(&mut block[..]))
            .unwrap();

    assert_eq!(record.allocation_kind(), AllocationKind::MmapReadOnly);
    let TensorData::ConstantAlias(bytes) = record.data else {
        panic!("expected aliased constant data");
    };
    assert_eq!(bytes.as_ptr(), model.buffer(weights).unwrap().as_ptr());
    // Only the dims array touched the arena.
    assert_eq!(arena.allocation_count(), 1);
}

#[test]
fn zero_length_buffer_falls_back_to_writable_memory() {
    let mut model = ModelFixture::new();
    let empty = model.push_buffer(Vec::new());
    let missing = model.push_null();
    model.push_tensor(TensorDef::new(SchemaType::Int8, &[5]).with_buffer(empty));
    model.push_tensor(TensorDef::new(SchemaType::Int8, &[5]).with_buffer(missing));
    let pool = model.pool();

    let mut arena = Arena::with_capacity(256).unwrap();
    let mut reporter = RecordingReporter::new();
    let mut loader = ModelLoader::new(&mut arena, &pool[..], &mut reporter);
    let mut records = Vec::new();
    loader.load_all(model.tensors(), &mut records).unwrap();

    for record in &records {
        assert_eq!(record.allocation_kind(), AllocationKind::ArenaReadWrite);
        assert_eq!(record.bytes, 5);
    }
}

#[test]
fn caller_block_is_used_for_writable_tensor() {
    let mut model = ModelFixture::new();
    model.push_tensor(TensorDef::new(SchemaType::Int32, &[4]).named("state").variable());
    let pool = model.pool();
    let def = model.tensors().next().unwrap();

    let mut arena = Arena::with_capacity(256).unwrap();
    let mut reporter = RecordingReporter::new();
    let mut block = vec![0u8; 16];
    let block_ptr = block.as_ptr();
    let mut record = materialize_tensor(
        def,
        &pool[..],
        &mut arena,
        &mut reporter,
        Some(block.as_mut_slice()),
    )
    .unwrap();

    assert!(record.is_variable);
    assert_eq!(record.bytes, 16);
    assert_eq!(arena.allocation_count(), 1);
    let data = record.data_bytes_mut(&mut arena).unwrap();
    assert_eq!(data.as_ptr(), block_ptr);
    data[0] = 7;
    drop(record);
    assert_eq!(block[0], 7);
}

#[test]
fn quantization_decodes_in_either_byte_order() {
    for encoding in [ZeroPointEncoding::Little, ZeroPointEncoding::Big] {
        let mut model = ModelFixture::new();
        model.push_tensor(
            TensorDef::new(SchemaType::UInt8, &[1, 8]).quantized(0.5, -3, encoding),
        );
        let pool = model.pool();
        let def = model.tensors().next().unwrap();

        let mut arena = Arena::with_capacity(256).unwrap();
        let mut reporter = RecordingReporter::new();
        let record = materialize_tensor(def, &pool[..], &mut arena, &mut reporter, None).unwrap();

        assert_eq!(record.quantization.scale, 0.5, "{encoding:?}");
        assert_eq!(record.quantization.zero_point, -3, "{encoding:?}");
    }
}

#[test]
fn missing_name_gets_placeholder_in_record_and_report() {
    let mut model = ModelFixture::new();
    model.push_tensor(TensorDef::new(SchemaType::Float32, &[1]));
    model.push_tensor(TensorDef::new(SchemaType::Float16, &[1]));
    let pool = model.pool();
    let mut defs = model.tensors();

    let mut arena = Arena::with_capacity(256).unwrap();
    let mut reporter = RecordingReporter::new();
    let record =
        materialize_tensor(defs.next().unwrap(), &pool[..], &mut arena, &mut reporter, None)
            .unwrap();
    assert_eq!(record.name, ember::tensor::UNNAMED_TENSOR);

    let err = materialize_tensor(defs.next().unwrap(), &pool[..], &mut arena, &mut reporter, None)
        .unwrap_err();
    assert!(err.is_unsupported_type());
    assert_eq!(
        reporter.messages(),
        &["tensor '<No name>': type FLOAT16 (10) is not supported".to_string()]
    );
}

#[test]
fn loader_stops_at_first_failure_and_keeps_prior_records() {
    let mut model = ModelFixture::new();
    model.push_tensor(TensorDef::new(SchemaType::Float32, &[8]).named("a"));
    model.push_tensor(TensorDef::new(SchemaType::Float32, &[1024]).named("too_big"));
    model.push_tensor(TensorDef::new(SchemaType::Float32, &[1]).named("never"));
    let pool = model.pool();

    let mut arena = Arena::with_capacity(512).unwrap();
    let mut reporter = RecordingReporter::new();
    let mut records = Vec::new();
    let mut loader = ModelLoader::new(&mut arena, &pool[..], &mut reporter);
    let err = loader.load_all(model.tensors(), &mut records).unwrap_err();

    assert_eq!(err.index, TensorIndex(1));
    assert!(err.source.is_arena_exhausted());
    assert_eq!(loader.loaded(), 1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "a");
    assert_eq!(reporter.len(), 1);
    assert!(reporter.messages()[0].starts_with("tensor 'too_big': "));
}
