//! Type conversion and bound checks for option-arguments.
//!
//! [`convert`] turns option-argument text into a [`Value`] of the requested
//! [`ValueType`]; [`check_bounds`] then compares the result against an
//! option's [`Bounds`]. Integer comparisons are exact over the full 64-bit
//! domains; only float values are compared as `f64`.

use std::cmp::Ordering;

use crate::error::{ConvertError, RangeError};
use crate::value::{Value, ValueType};

/// Inclusive bounds on an option-argument.
///
/// For [`ValueType::Str`] the bounds apply to the argument's length in
/// characters; for every other type they apply to the converted value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub const UNBOUNDED: Bounds = Bounds {
        min: None,
        max: None,
    };

    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Bounds { min, max }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Bounds {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

// ── Conversion ────────────────────────────────────────────────────────────────

/// Converts `text` to a value of type `ty`.
///
/// Integers take an optional sign followed by decimal digits or a `0x`/`0X`
/// hexadecimal number. Floats use Rust's float grammar. The whole text must be
/// consumed; empty text fails for every type except [`ValueType::Str`].
pub fn convert(text: &str, ty: ValueType) -> Result<Value, ConvertError> {
    match ty {
        ValueType::Str => Ok(Value::Str(text.to_owned())),
        ValueType::Char => convert_char(text),
        ValueType::F32 | ValueType::F64 => convert_float(text, ty),
        _ => convert_int(text, ty),
    }
}

fn convert_char(text: &str) -> Result<Value, ConvertError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(ConvertError::Empty {
            ty: ValueType::Char,
        }),
        (Some(c), None) => Ok(Value::Char(c)),
        (Some(_), Some(_)) => Err(ConvertError::Invalid {
            text: text.to_owned(),
            ty: ValueType::Char,
        }),
    }
}

fn convert_int(text: &str, ty: ValueType) -> Result<Value, ConvertError> {
    let wide = parse_i128(text, ty)?;
    // Every integer type has a domain; `convert` routes only integers here.
    let (lo, hi) = ty.int_domain().unwrap_or((i128::MIN, i128::MAX));
    if wide < lo || wide > hi {
        return Err(ConvertError::OutOfDomain {
            text: text.to_owned(),
            ty,
        });
    }
    // The casts below cannot truncate: `wide` lies within the type's domain.
    let value = match ty {
        ValueType::I8 => Value::I8(wide as i8),
        ValueType::U8 => Value::U8(wide as u8),
        ValueType::I16 => Value::I16(wide as i16),
        ValueType::U16 => Value::U16(wide as u16),
        ValueType::I32 => Value::I32(wide as i32),
        ValueType::U32 => Value::U32(wide as u32),
        ValueType::I64 => Value::I64(wide as i64),
        _ => Value::U64(wide as u64),
    };
    Ok(value)
}

/// Parses a signed decimal or hexadecimal integer into an `i128`.
fn parse_i128(text: &str, ty: ValueType) -> Result<i128, ConvertError> {
    if text.is_empty() {
        return Err(ConvertError::Empty { ty });
    }
    let invalid = || ConvertError::Invalid {
        text: text.to_owned(),
        ty,
    };

    let (negative, unsigned) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };
    // `from_str_radix` would accept a second sign; reject it up front.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    match i128::from_str_radix(digits, radix) {
        Ok(magnitude) => Ok(if negative { -magnitude } else { magnitude }),
        // Only overflow remains possible after the digit check.
        Err(_) => Err(ConvertError::OutOfDomain {
            text: text.to_owned(),
            ty,
        }),
    }
}

fn convert_float(text: &str, ty: ValueType) -> Result<Value, ConvertError> {
    if text.is_empty() {
        return Err(ConvertError::Empty { ty });
    }
    let wide: f64 = text.parse().map_err(|_| ConvertError::Invalid {
        text: text.to_owned(),
        ty,
    })?;
    if ty == ValueType::F64 {
        return Ok(Value::F64(wide));
    }
    if wide.is_finite() && wide.abs() > f32::MAX as f64 {
        return Err(ConvertError::OutOfDomain {
            text: text.to_owned(),
            ty,
        });
    }
    Ok(Value::F32(wide as f32))
}

// ── Bound checks ──────────────────────────────────────────────────────────────

/// Checks a converted value against `bounds`.
pub fn check_bounds(value: &Value, bounds: &Bounds) -> Result<(), RangeError> {
    if bounds.is_unbounded() {
        return Ok(());
    }
    let within = match value {
        Value::Str(s) => {
            let len = s.chars().count();
            if !within_bounds(|b| cmp_int(len as i128, b), bounds) {
                return Err(RangeError::Length {
                    len,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
            true
        }
        // Bounds are narrowed to the value's own precision.
        Value::F32(f) => within_bounds(|b| f.partial_cmp(&(b as f32)), bounds),
        v => match v.as_i128() {
            Some(i) => within_bounds(|b| cmp_int(i, b), bounds),
            None => match v.as_f64() {
                Some(f) => within_bounds(|b| f.partial_cmp(&b), bounds),
                None => true,
            },
        },
    };
    if within {
        Ok(())
    } else {
        Err(RangeError::Value {
            value: value.to_string(),
            min: bounds.min,
            max: bounds.max,
        })
    }
}

/// `true` when the comparison against both present bounds succeeds.
/// An unordered comparison (NaN) never succeeds.
fn within_bounds(cmp: impl Fn(f64) -> Option<Ordering>, bounds: &Bounds) -> bool {
    let above_min = bounds
        .min
        .map_or(true, |lo| matches!(cmp(lo), Some(Ordering::Greater | Ordering::Equal)));
    let below_max = bounds
        .max
        .map_or(true, |hi| matches!(cmp(hi), Some(Ordering::Less | Ordering::Equal)));
    above_min && below_max
}

/// Exact comparison of an integer with a float bound.
fn cmp_int(value: i128, bound: f64) -> Option<Ordering> {
    if bound.is_nan() {
        return None;
    }
    // Whole-number bounds inside the i128 range convert exactly.
    if bound.fract() == 0.0 && bound.abs() < 1.0e38 {
        return Some(value.cmp(&(bound as i128)));
    }
    if bound.is_infinite() {
        return Some(if bound > 0.0 { Ordering::Less } else { Ordering::Greater });
    }
    (value as f64).partial_cmp(&bound)
}
