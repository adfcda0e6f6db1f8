//! Lenient integer parsing for trace fields.
//!
//! Trace files are produced by RTL testbenches and hand-edited listings, so
//! numbers are read the forgiving way: surrounding whitespace is ignored, an
//! optional sign is accepted, a `0x` prefix selects hexadecimal, and anything
//! after the leading digits is dropped (`"12 ; comment"` reads as 12).

use serde::Serialize;

use crate::common::Pc;

/// A numeric field read from a trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reading {
    /// The field held a number.
    Value(i64),
    /// The field was present but held no leading digits. Projects as an idle stage.
    Malformed,
}

impl Reading {
    /// Parses a field, falling back to [`Reading::Malformed`].
    pub fn parse(field: &str) -> Self {
        parse_int(field).map_or(Self::Malformed, Self::Value)
    }

    /// Returns the value, or `None` for a malformed field.
    #[inline]
    pub const fn value(self) -> Option<Pc> {
        match self {
            Self::Value(v) => Some(v),
            Self::Malformed => None,
        }
    }
}

/// Parses the leading integer of `field`.
///
/// Returns `None` when no digit follows the optional sign/prefix, or when the
/// digits overflow an `i64`.
pub fn parse_int(field: &str) -> Option<i64> {
    let s = field.trim();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
