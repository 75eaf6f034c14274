//! Owned tensor descriptors and buffer pools.
//!
//! [`TensorDef`] mirrors one serialized tensor descriptor and implements
//! [`TensorSource`] by reference. [`ModelFixture`] owns a constant-buffer
//! pool plus a tensor list, in the same shape a parsed model exposes.

use ember_core::{
    BufferIndex, QuantizationView, SchemaType, Shape, TensorSource, ZeroPointEncoding,
};
use smallvec::SmallVec;

/// Owned quantization block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuantDef {
    pub scale: Vec<f32>,
    pub zero_point: Vec<u8>,
    pub encoding: ZeroPointEncoding,
}

/// Owned stand-in for a serialized tensor descriptor.
///
/// Defaults to buffer 0, no quantization, no name, not variable.
#[derive(Clone, Debug, PartialEq)]
pub struct TensorDef {
    pub type_tag: u8,
    pub shape: Shape,
    pub buffer: BufferIndex,
    pub quantization: Option<QuantDef>,
    pub name: Option<String>,
    pub is_variable: bool,
}

impl TensorDef {
    pub fn new(ty: SchemaType, shape: &[i32]) -> Self {
        Self {
            type_tag: ty.tag(),
            shape: SmallVec::from_slice(shape),
            buffer: BufferIndex(0),
            quantization: None,
            name: None,
            is_variable: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_buffer(mut self, buffer: BufferIndex) -> Self {
        self.buffer = buffer;
        self
    }

    /// Override the raw schema tag, e.g. with a value no schema defines.
    pub fn with_type_tag(mut self, tag: u8) -> Self {
        self.type_tag = tag;
        self
    }

    /// Attach a single-channel quantization block packed in `encoding`.
    pub fn quantized(mut self, scale: f32, zero_point: i64, encoding: ZeroPointEncoding) -> Self {
        self.quantization = Some(QuantDef {
            scale: vec![scale],
            zero_point: encoding.encode(zero_point).to_vec(),
            encoding,
        });
        self
    }

    /// Attach a raw quantization block.
    pub fn with_quantization(mut self, quantization: QuantDef) -> Self {
        self.quantization = Some(quantization);
        self
    }

    pub fn variable(mut self) -> Self {
        self.is_variable = true;
        self
    }
}

impl<'m> TensorSource<'m> for &'m TensorDef {
    fn type_tag(&self) -> u8 {
        self.type_tag
    }

    fn shape(&self) -> &[i32] {
        &self.shape
    }

    fn buffer(&self) -> BufferIndex {
        self.buffer
    }

    fn quantization(&self) -> Option<QuantizationView<'_>> {
        self.quantization.as_ref().map(|q| QuantizationView {
            scale: &q.scale,
            zero_point: &q.zero_point,
            encoding: q.encoding,
        })
    }

    fn name(&self) -> Option<&'m str> {
        let def: &'m TensorDef = *self;
        def.name.as_deref()
    }

    fn is_variable(&self) -> bool {
        self.is_variable
    }
}

/// Owned model: a constant-buffer pool and a tensor list.
///
/// Buffer 0 is the empty sentinel, as in serialized models.
#[derive(Clone, Debug)]
pub struct ModelFixture {
    buffers: Vec<Option<Vec<u8>>>,
    tensors: Vec<TensorDef>,
}

impl ModelFixture {
    pub fn new() -> Self {
        Self {
            buffers: vec![Some(Vec::new())],
            tensors: Vec::new(),
        }
    }

    /// Append a buffer carrying `data`. An empty `data` is a present but
    /// zero-length byte array.
    pub fn push_buffer(&mut self, data: Vec<u8>) -> BufferIndex {
        self.buffers.push(Some(data));
        self.last_buffer()
    }

    /// Append a buffer entry with no byte array at all.
    pub fn push_null(&mut self) -> BufferIndex {
        self.buffers.push(None);
        self.last_buffer()
    }

    pub fn push_tensor(&mut self, tensor: TensorDef) -> &mut Self {
        self.tensors.push(tensor);
        self
    }

    pub fn buffer(&self, index: BufferIndex) -> Option<&[u8]> {
        self.buffers.get(index.0 as usize)?.as_deref()
    }

    /// Borrowed pool view, usable wherever a `BufferSource` is expected.
    pub fn pool(&self) -> Vec<Option<&[u8]>> {
        self.buffers.iter().map(|b| b.as_deref()).collect()
    }

    pub fn tensors(&self) -> impl Iterator<Item = &TensorDef> {
        self.tensors.iter()
    }

    pub fn tensor_count(&self) -> usize {
        self.tensors.len()
    }

    fn last_buffer(&self) -> BufferIndex {
        BufferIndex(self.buffers.len() as u32 - 1)
    }
}

impl Default for ModelFixture {
    fn default() -> Self {
        Self::new()
    }
}
