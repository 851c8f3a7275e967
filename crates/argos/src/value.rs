//! Type-erased bound values.
//!
//! [`TypedValue`] is the tagged union that flows across the one boundary in
//! this crate that must be dynamically typed: a `RequireIfValue` /
//! `AllowOnlyIfValue` predicate closure is written once against a generic
//! `T`, but the Constraint Engine drives it from the Binding Table without
//! knowing `T` at the call site. Routing through `TypedValue` means the
//! predicate still never sees a raw, unconverted string — only a typed
//! accessor — matching the Design Notes' "dynamic typing at the predicate
//! boundary" decision.

use num_traits::ToPrimitive;

/// A converted option or positional value with its static type erased.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<TypedValue>),
    /// The option was never bound (`ValueSource::Missing`, no default).
    Null,
}

impl TypedValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) => f.to_i64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(n) => n.to_f64(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for TypedValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_casts_to_f64() {
        let v = TypedValue::Int(7);
        assert_eq!(v.as_f64(), Some(7.0));
    }

    #[test]
    fn float_casts_to_i64_when_exact() {
        let v = TypedValue::Float(3.0);
        assert_eq!(v.as_i64(), Some(3));
    }

    #[test]
    fn str_has_no_numeric_projection() {
        let v = TypedValue::Str("hi".into());
        assert_eq!(v.as_i64(), None);
        assert_eq!(v.as_f64(), None);
    }

    #[test]
    fn null_is_null() {
        assert!(TypedValue::Null.is_null());
        assert!(!TypedValue::Bool(false).is_null());
    }
}
