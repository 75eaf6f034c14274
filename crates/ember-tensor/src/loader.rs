//! Materializing a whole model's tensor list against one arena.

use ember_arena::{Arena, ArenaStorage, ArenaUsage};
use ember_core::{BufferSource, ErrorReporter, TensorIndex, TensorSource};

use crate::error::{LoadError, MaterializeError};
use crate::materialize::materialize_tensor;
use crate::record::TensorRecord;

/// Binds an arena, a constant-buffer pool and a reporter for one model load.
///
/// The loader owns nothing; dropping it leaves every committed allocation in
/// the arena. A failed load is abandoned by discarding the arena together
/// with the records produced so far.
pub struct ModelLoader<'a, B: ?Sized, R: ?Sized, S> {
    arena: &'a mut Arena<S>,
    buffers: &'a B,
    reporter: &'a mut R,
    loaded: usize,
}

impl<'a, B, R, S> ModelLoader<'a, B, R, S>
where
    B: ?Sized,
    R: ErrorReporter + ?Sized,
    S: ArenaStorage,
{
    /// Create a loader over the given arena and buffer pool.
    pub fn new(arena: &'a mut Arena<S>, buffers: &'a B, reporter: &'a mut R) -> Self {
        Self {
            arena,
            buffers,
            reporter,
            loaded: 0,
        }
    }

    /// Materialize a single tensor.
    pub fn load_tensor<'m, 'b, 't, T>(
        &mut self,
        tensor: T,
        preallocated: Option<&'m mut [u8]>,
    ) -> Result<TensorRecord<'m>, MaterializeError>
    where
        'b: 'm,
        't: 'm,
        T: TensorSource<'t>,
        B: BufferSource<'b>,
    {
        let record = materialize_tensor(
            tensor,
            self.buffers,
            &mut *self.arena,
            &mut *self.reporter,
            preallocated,
        )?;
        self.loaded += 1;
        Ok(record)
    }

    /// Materialize `tensors` in order into `out`, stopping at the first
    /// failure.
    ///
    /// Returns the number of records appended. On failure the records
    /// already appended stay in `out`; a model with any unmaterialized
    /// tensor cannot execute, so callers normally drop everything.
    pub fn load_all<'m, 'b, 't, I, E>(
        &mut self,
        tensors: I,
        out: &mut E,
    ) -> Result<usize, LoadError>
    where
        'b: 'm,
        't: 'm,
        I: IntoIterator,
        I::Item: TensorSource<'t>,
        B: BufferSource<'b>,
        E: Extend<TensorRecord<'m>>,
    {
        let mut appended = 0usize;
        for (position, tensor) in tensors.into_iter().enumerate() {
            let index = TensorIndex(u32::try_from(position).unwrap_or(u32::MAX));
            match self.load_tensor(tensor, None) {
                Ok(record) => {
                    out.extend(std::iter::once(record));
                    appended += 1;
                }
                Err(source) => {
                    tracing::debug!(%index, usage = %self.arena.usage(), "model load aborted");
                    return Err(LoadError { index, source });
                }
            }
        }
        tracing::debug!(tensors = appended, usage = %self.arena.usage(), "model load complete");
        Ok(appended)
    }

    /// Tensors materialized through this loader so far.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// Current arena usage.
    pub fn usage(&self) -> ArenaUsage {
        self.arena.usage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AllocationKind;
    use ember_core::SchemaType;
    use ember_test_utils::{ModelFixture, RecordingReporter, TensorDef};

    fn small_model() -> ModelFixture {
        let mut model = ModelFixture::new();
        let weights = model.push_buffer(vec![1; 16]);
        model.push_tensor(TensorDef::new(SchemaType::Float32, &[1, 4]).named("input"));
        model.push_tensor(
            TensorDef::new(SchemaType::Float32, &[4, 4])
                .named("weights")
                .with_buffer(weights),
        );
        model.push_tensor(TensorDef::new(SchemaType::Float32, &[1, 4]).named("output"));
        model
    }

    #[test]
    fn load_all_materializes_in_order() {
        let model = small_model();
        let pool = model.pool();
        let mut arena = Arena::with_capacity(256).unwrap();
        let mut reporter = RecordingReporter::new();
        let mut records = Vec::new();

        let mut loader = ModelLoader::new(&mut arena, &pool[..], &mut reporter);
        let count = loader.load_all(model.tensors(), &mut records).unwrap();

        assert_eq!(count, 3);
        assert_eq!(loader.loaded(), 3);
        let names: Vec<_> = records.iter().map(|r| r.name).collect();
        assert_eq!(names, ["input", "weights", "output"]);
        assert_eq!(records[1].allocation_kind(), AllocationKind::MmapReadOnly);
        assert_eq!(records[0].allocation_kind(), AllocationKind::ArenaReadWrite);
    }

    #[test]
    fn load_all_stops_at_first_failure() {
        let mut model = small_model();
        model.push_tensor(TensorDef::new(SchemaType::Float16, &[2]).named("half"));
        model.push_tensor(TensorDef::new(SchemaType::Int8, &[2]).named("never"));
        let pool = model.pool();
        let mut arena = Arena::with_capacity(256).unwrap();
        let mut reporter = RecordingReporter::new();
        let mut records = Vec::new();

        let err = ModelLoader::new(&mut arena, &pool[..], &mut reporter)
            .load_all(model.tensors(), &mut records)
            .unwrap_err();

        assert_eq!(err.index, TensorIndex(3));
        assert!(err.source.is_unsupported_type());
        assert_eq!(records.len(), 3);
        assert_eq!(reporter.len(), 1);
        assert!(reporter.messages()[0].contains("'half'"));
    }

    #[test]
    fn usage_reflects_arena() {
        let model = small_model();
        let pool = model.pool();
        let mut arena = Arena::with_capacity(256).unwrap();
        let mut reporter = RecordingReporter::new();
        let mut loader = ModelLoader::new(&mut arena, &pool[..], &mut reporter);

        assert_eq!(loader.usage().used, 0);
        loader
            .load_tensor(&TensorDef::new(SchemaType::Int64, &[2]), None)
            .unwrap();
        // 16 payload bytes plus an 8-byte dimensions array.
        assert!(loader.usage().used >= 24);
        assert_eq!(loader.usage().allocations, 2);
    }
}
