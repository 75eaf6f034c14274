//! Element types: the serialized schema tag and the runtime type.
//!
//! A descriptor names its element type with a [`SchemaType`] tag. The
//! materializer converts it to an [`ElementType`] and then asks for the
//! type's byte width. The two enumerations number their variants
//! differently, so the conversion is an explicit table rather than a cast.

use std::fmt;

use crate::error::TypeError;

/// Element type as encoded in a serialized model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SchemaType {
    /// IEEE 754 single precision.
    Float32 = 0,
    /// IEEE 754 half precision.
    Float16 = 1,
    /// Signed 32-bit integer.
    Int32 = 2,
    /// Unsigned 8-bit integer.
    UInt8 = 3,
    /// Signed 64-bit integer.
    Int64 = 4,
    /// Variable-length string payload.
    String = 5,
    /// Boolean, one byte per element.
    Bool = 6,
    /// Signed 16-bit integer.
    Int16 = 7,
    /// Complex number stored as two `f32`.
    Complex64 = 8,
    /// Signed 8-bit integer.
    Int8 = 9,
}

impl SchemaType {
    /// Decode a raw schema tag.
    pub fn from_tag(tag: u8) -> Result<Self, TypeError> {
        Ok(match tag {
            0 => Self::Float32,
            1 => Self::Float16,
            2 => Self::Int32,
            3 => Self::UInt8,
            4 => Self::Int64,
            5 => Self::String,
            6 => Self::Bool,
            7 => Self::Int16,
            8 => Self::Complex64,
            9 => Self::Int8,
            _ => return Err(TypeError::UnknownSchemaType { tag }),
        })
    }

    /// The raw tag for this schema type.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// Runtime element type of a materialized tensor.
///
/// `NoType`, `String` and `Float16` are valid runtime types but have no
/// fixed width in this allocator; [`ElementType::size_of`] rejects them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ElementType {
    /// No type assigned yet.
    #[default]
    NoType = 0,
    /// IEEE 754 single precision.
    Float32 = 1,
    /// Signed 32-bit integer.
    Int32 = 2,
    /// Unsigned 8-bit integer.
    UInt8 = 3,
    /// Signed 64-bit integer.
    Int64 = 4,
    /// Variable-length string payload.
    String = 5,
    /// Boolean, one byte per element.
    Bool = 6,
    /// Signed 16-bit integer.
    Int16 = 7,
    /// Complex number stored as two `f32`.
    Complex64 = 8,
    /// Signed 8-bit integer.
    Int8 = 9,
    /// IEEE 754 half precision.
    Float16 = 10,
}

impl ElementType {
    /// Every runtime type, in code order.
    pub const ALL: [ElementType; 11] = [
        Self::NoType,
        Self::Float32,
        Self::Int32,
        Self::UInt8,
        Self::Int64,
        Self::String,
        Self::Bool,
        Self::Int16,
        Self::Complex64,
        Self::Int8,
        Self::Float16,
    ];

    /// Resolve a raw schema tag straight to a runtime type.
    pub fn from_schema_tag(tag: u8) -> Result<Self, TypeError> {
        SchemaType::from_tag(tag).map(Self::from)
    }

    /// Byte width of one element.
    ///
    /// Total over the fixed-width types. Everything else fails with
    /// [`TypeError::Unsupported`], never a default width.
    pub fn size_of(self) -> Result<usize, TypeError> {
        match self {
            Self::Float32 => Ok(std::mem::size_of::<f32>()),
            Self::Int16 => Ok(std::mem::size_of::<i16>()),
            Self::Int32 => Ok(std::mem::size_of::<i32>()),
            Self::Int8 => Ok(std::mem::size_of::<i8>()),
            Self::UInt8 => Ok(std::mem::size_of::<u8>()),
            Self::Int64 => Ok(std::mem::size_of::<i64>()),
            Self::Bool => Ok(std::mem::size_of::<bool>()),
            Self::Complex64 => Ok(std::mem::size_of::<f32>() * 2),
            Self::NoType | Self::String | Self::Float16 => Err(TypeError::Unsupported {
                name: self.name(),
                code: self.code(),
            }),
        }
    }

    /// Numeric runtime type code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Symbolic name, as used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::NoType => "NOTYPE",
            Self::Float32 => "FLOAT32",
            Self::Int32 => "INT32",
            Self::UInt8 => "UINT8",
            Self::Int64 => "INT64",
            Self::String => "STRING",
            Self::Bool => "BOOL",
            Self::Int16 => "INT16",
            Self::Complex64 => "COMPLEX64",
            Self::Int8 => "INT8",
            Self::Float16 => "FLOAT16",
        }
    }
}

impl From<SchemaType> for ElementType {
    fn from(schema: SchemaType) -> Self {
        match schema {
            SchemaType::Float32 => Self::Float32,
            SchemaType::Float16 => Self::Float16,
            SchemaType::Int32 => Self::Int32,
            SchemaType::UInt8 => Self::UInt8,
            SchemaType::Int64 => Self::Int64,
            SchemaType::String => Self::String,
            SchemaType::Bool => Self::Bool,
            SchemaType::Int16 => Self::Int16,
            SchemaType::Complex64 => Self::Complex64,
            SchemaType::Int8 => Self::Int8,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
