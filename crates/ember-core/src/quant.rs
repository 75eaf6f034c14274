//! Quantization parameters and zero-point decoding.
//!
//! Serialized models store zero points as packed 64-bit integers whose
//! byte order depends on the encoder. [`QuantizationView`] carries the raw
//! bytes together with their [`ZeroPointEncoding`]; decoding always yields a
//! host-native `i64`.

use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian};

/// Width of one packed zero-point element in bytes.
pub const ZERO_POINT_WIDTH: usize = std::mem::size_of::<i64>();

/// Byte order of a packed zero-point array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZeroPointEncoding {
    /// Little-endian, the byte order of the serialized model format.
    #[default]
    Little,
    /// Big-endian.
    Big,
    /// Whatever the host uses.
    Native,
}

impl ZeroPointEncoding {
    /// Read one packed zero point. `bytes` must hold at least 8 bytes.
    fn read(self, bytes: &[u8]) -> i64 {
        match self {
            Self::Little => LittleEndian::read_i64(bytes),
            Self::Big => BigEndian::read_i64(bytes),
            Self::Native => NativeEndian::read_i64(bytes),
        }
    }

    /// Pack a zero point in this byte order.
    pub fn encode(self, value: i64) -> [u8; ZERO_POINT_WIDTH] {
        let mut buf = [0u8; ZERO_POINT_WIDTH];
        match self {
            Self::Little => LittleEndian::write_i64(&mut buf, value),
            Self::Big => BigEndian::write_i64(&mut buf, value),
            Self::Native => NativeEndian::write_i64(&mut buf, value),
        }
        buf
    }
}

/// Borrowed view of a descriptor's quantization block.
///
/// `scale` and `zero_point` are parallel arrays; `zero_point` holds the
/// packed bytes exactly as they appear in the serialized model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuantizationView<'m> {
    /// Per-channel scales. Only the first entry is honoured.
    pub scale: &'m [f32],
    /// Packed zero points, [`ZERO_POINT_WIDTH`] bytes each.
    pub zero_point: &'m [u8],
    /// Byte order of `zero_point`.
    pub encoding: ZeroPointEncoding,
}

impl<'m> QuantizationView<'m> {
    /// Number of complete packed zero points.
    pub fn zero_point_count(&self) -> usize {
        self.zero_point.len() / ZERO_POINT_WIDTH
    }

    /// The first zero point in host byte order, if one is present.
    ///
    /// A trailing fragment shorter than one element is ignored.
    pub fn first_zero_point(&self) -> Option<i64> {
        self.zero_point
            .get(..ZERO_POINT_WIDTH)
            .map(|bytes| self.encoding.read(bytes))
    }
}

/// Affine quantization parameters of a runtime tensor.
///
/// `real = scale * (stored - zero_point)`. Both fields stay at zero for
/// tensors without quantization data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuantizationParams {
    /// Scale factor.
    pub scale: f32,
    /// Zero point in host byte order.
    pub zero_point: i64,
}

impl QuantizationParams {
    /// Decode parameters from an optional quantization block.
    ///
    /// Only applies when the block has at least one scale and at least one
    /// complete zero point; otherwise the zero defaults are returned.
    pub fn from_view(view: Option<&QuantizationView<'_>>) -> Self {
        let Some(view) = view else {
            return Self::default();
        };
        match (view.scale.first(), view.first_zero_point()) {
            (Some(&scale), Some(zero_point)) => Self { scale, zero_point },
            _ => Self::default(),
        }
    }

    /// Whether these are the zero defaults.
    pub fn is_unset(&self) -> bool {
        self.scale == 0.0 && self.zero_point == 0
    }
}
