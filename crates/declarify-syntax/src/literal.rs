//! Classified argument values
//!
//! The classifier decides once, at analysis time, whether a value is a
//! [`Literal`] that can move into the declarative document or an [`Opaque`]
//! expression that must stay in the call.

use std::fmt;

/// A single literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// String literal, escapes decoded
    Str(String),
    /// Integer literal
    Int(i128),
    /// Float literal (finite)
    Float(f64),
    /// `True` / `False`
    Bool(bool),
}

impl Scalar {
    /// Kind name used in diagnostics
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Str(_) => "string",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Bool(_) => "boolean",
        }
    }
}

/// Renders the value the way Python's `str()` would
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(value) => write_python_float(f, *value),
            Scalar::Bool(true) => f.write_str("True"),
            Scalar::Bool(false) => f.write_str("False"),
        }
    }
}

/// Shortest round-trip digits, laid out as Python's `repr(float)` does:
/// positional for decimal exponents in `-4..16`, otherwise `1.5e+16`.
fn write_python_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let sci = format!("{value:e}");
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return write!(f, "{value}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return write!(f, "{value}");
    };
    if let Some(stripped) = mantissa.strip_prefix('-') {
        f.write_str("-")?;
        return write_digits(f, stripped, exponent);
    }
    write_digits(f, mantissa, exponent)
}

fn write_digits(f: &mut fmt::Formatter<'_>, mantissa: &str, exponent: i32) -> fmt::Result {
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let point = exponent + 1;

    if point <= -4 || point > 16 {
        let (head, tail) = digits.split_at(1);
        f.write_str(head)?;
        if !tail.is_empty() {
            write!(f, ".{tail}")?;
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        return write!(f, "e{sign}{:02}", exponent.unsigned_abs());
    }

    match usize::try_from(point) {
        Ok(0) | Err(_) => {
            let zeros = "0".repeat(usize::try_from(-point).unwrap_or(0));
            write!(f, "0.{zeros}{digits}")
        }
        Ok(point) if digits.len() <= point => {
            write!(f, "{digits}{}.0", "0".repeat(point - digits.len()))
        }
        Ok(point) => write!(f, "{}.{}", &digits[..point], &digits[point..]),
    }
}

/// Payload of a provably simple value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A direct scalar literal
    Scalar(Scalar),
    /// A flat list or tuple of scalars
    Sequence(Vec<Scalar>),
    /// A dict literal with string keys and scalar values, in source order
    Mapping(Vec<(String, Scalar)>),
    /// `None`: the argument is present but supplies no value
    Absent,
}

impl Literal {
    /// Kind name used in diagnostics
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Scalar(s) => s.kind(),
            Literal::Sequence(_) => "sequence",
            Literal::Mapping(_) => "mapping",
            Literal::Absent => "none",
        }
    }
}

/// Why a value could not be proven literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    /// tree-sitter kind of the offending expression
    pub kind: &'static str,
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` expression", self.kind)
    }
}

/// Result of classifying an argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedValue {
    /// Provably simple; safe to migrate
    Literal(Literal),
    /// Anything else; stays in the call
    Opaque(Opaque),
}

impl ClassifiedValue {
    /// Check if the value is literal
    #[inline]
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, ClassifiedValue::Literal(_))
    }

    /// Literal payload, if any
    #[inline]
    #[must_use]
    pub fn literal(&self) -> Option<&Literal> {
        match self {
            ClassifiedValue::Literal(lit) => Some(lit),
            ClassifiedValue::Opaque(_) => None,
        }
    }
}
