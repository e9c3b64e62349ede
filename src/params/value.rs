use crate::color::Color;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamKind {
    /// A pixel length, formatted with a `px` suffix
    Length,
    /// A bare number
    Scalar,
    Color,
    /// One of a fixed set of tokens
    Choice(&'static [&'static str]),
}

impl ParamKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ParamKind::Length | ParamKind::Scalar)
    }
}

/// Inclusive bounds on a numeric parameter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Bounds {
        Bounds { min, max }
    }

    pub fn check(self, value: f64) -> Result<f64, OutOfRange> {
        if (self.min..=self.max).contains(&value) {
            Ok(value)
        } else {
            Err(OutOfRange {
                value,
                bounds: self,
            })
        }
    }
}

/// A numeric value fell outside its parameter's declared bounds.  The store
/// never reports this to callers; it stores [`OutOfRange::clamped`] instead.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("value {value} outside of [{}, {}]", bounds.min, bounds.max)]
pub struct OutOfRange {
    pub value: f64,
    pub bounds: Bounds,
}

impl OutOfRange {
    pub fn clamped(&self) -> f64 {
        self.value.clamp(self.bounds.min, self.bounds.max)
    }
}

/// The raw, stored value of a parameter
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Color(Color),
    Token(&'static str),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            ParamValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&'static str> {
        match self {
            ParamValue::Token(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Color(c) => write!(f, "{c}"),
            ParamValue::Token(t) => f.write_str(t),
        }
    }
}

/// A parameter's value as consumers should use it: lengths have had the
/// card scale applied (if the parameter scales) and been rounded to whole
/// pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effective {
    Length(i64),
    Scalar(f64),
    Color(Color),
    Token(&'static str),
}

impl fmt::Display for Effective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effective::Length(px) => write!(f, "{px}px"),
            Effective::Scalar(n) => write!(f, "{n}"),
            Effective::Color(c) => write!(f, "{c}"),
            Effective::Token(t) => f.write_str(t),
        }
    }
}

/// What [`ParamStore::set`](super::ParamStore::set) did with its input
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SetOutcome {
    Stored,
    /// The value was outside the parameter's bounds and was clamped
    Clamped,
    /// The input could not be interpreted for this kind of parameter; the
    /// previous value was kept
    Ignored,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParamError {
    #[error("unknown parameter {0:?}")]
    Unknown(String),
}
