//! Scalar value model shared by the converter, the list splitter, and the
//! typed destinations.
//!
//! [`ValueType`] names a conversion target, [`Value`] holds a converted
//! option-argument, and [`Scalar`] links a Rust type to its `ValueType` so
//! destinations can declare what they accept.

use std::fmt;

/// Target type for option-argument conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    /// No conversion; the raw text.
    #[default]
    Str,
    /// Exactly one character.
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl ValueType {
    /// Returns `true` for every type whose bounds are numeric rather than
    /// string lengths.
    pub fn is_numeric(self) -> bool {
        !matches!(self, ValueType::Str)
    }

    pub fn is_integer(self) -> bool {
        self.int_domain().is_some()
    }

    pub fn is_float(self) -> bool {
        matches!(self, ValueType::F32 | ValueType::F64)
    }

    /// Inclusive value domain of an integer type.
    pub fn int_domain(self) -> Option<(i128, i128)> {
        let domain = match self {
            ValueType::I8 => (i8::MIN as i128, i8::MAX as i128),
            ValueType::U8 => (0, u8::MAX as i128),
            ValueType::I16 => (i16::MIN as i128, i16::MAX as i128),
            ValueType::U16 => (0, u16::MAX as i128),
            ValueType::I32 => (i32::MIN as i128, i32::MAX as i128),
            ValueType::U32 => (0, u32::MAX as i128),
            ValueType::I64 => (i64::MIN as i128, i64::MAX as i128),
            ValueType::U64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(domain)
    }

    /// Short human-readable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Str => "string",
            ValueType::Char => "character",
            ValueType::I8 => "8-bit integer",
            ValueType::U8 => "unsigned 8-bit integer",
            ValueType::I16 => "16-bit integer",
            ValueType::U16 => "unsigned 16-bit integer",
            ValueType::I32 => "integer",
            ValueType::U32 => "unsigned integer",
            ValueType::I64 => "64-bit integer",
            ValueType::U64 => "unsigned 64-bit integer",
            ValueType::F32 => "number",
            ValueType::F64 => "number",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A converted option-argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Char(char),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Str(_) => ValueType::Str,
            Value::Char(_) => ValueType::Char,
            Value::I8(_) => ValueType::I8,
            Value::U8(_) => ValueType::U8,
            Value::I16(_) => ValueType::I16,
            Value::U16(_) => ValueType::U16,
            Value::I32(_) => ValueType::I32,
            Value::U32(_) => ValueType::U32,
            Value::I64(_) => ValueType::I64,
            Value::U64(_) => ValueType::U64,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
        }
    }

    /// Exact integer view of integer values (and of a character's code point).
    pub fn as_i128(&self) -> Option<i128> {
        let v = match *self {
            Value::Char(c) => c as i128,
            Value::I8(v) => v as i128,
            Value::U8(v) => v as i128,
            Value::I16(v) => v as i128,
            Value::U16(v) => v as i128,
            Value::I32(v) => v as i128,
            Value::U32(v) => v as i128,
            Value::I64(v) => v as i128,
            Value::U64(v) => v as i128,
            _ => return None,
        };
        Some(v)
    }

    /// Floating-point view of any numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::F32(v) => Some(v as f64),
            Value::F64(v) => Some(v),
            _ => self.as_i128().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Char(c) => write!(f, "{c}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
        }
    }
}

/// A Rust type that an option-argument can be converted into.
pub trait Scalar: Sized + 'static {
    /// Conversion target for this type.
    const TYPE: ValueType;

    /// Extracts `Self` from a value of the matching variant.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const TYPE: ValueType = ValueType::$variant;

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_scalar! {
    String => Str,
    char => Char,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}
