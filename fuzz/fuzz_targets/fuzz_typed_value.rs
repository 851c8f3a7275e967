#![no_main]

use arbitrary::Arbitrary;
use argos::TypedValue;
use libfuzzer_sys::fuzz_target;

/// Mirrors [`TypedValue`]'s shape so `arbitrary` can build arbitrarily
/// nested instances, including `List` values several levels deep.
#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<FuzzValue>),
    Null,
}

impl From<FuzzValue> for TypedValue {
    fn from(v: FuzzValue) -> Self {
        match v {
            FuzzValue::Str(s) => Self::Str(s),
            FuzzValue::Int(n) => Self::Int(n),
            FuzzValue::Float(f) => Self::Float(f),
            FuzzValue::Bool(b) => Self::Bool(b),
            FuzzValue::List(xs) => Self::List(xs.into_iter().map(Into::into).collect()),
            FuzzValue::Null => Self::Null,
        }
    }
}

fuzz_target!(|input: FuzzValue| {
    let value: TypedValue = input.into();

    // None of the accessors should ever panic, regardless of variant.
    let _ = value.as_str();
    let _ = value.as_bool();
    let _ = value.as_i64();
    let _ = value.as_f64();
    let _ = value.is_null();

    // Debug/Clone/PartialEq must never panic either.
    let _ = format!("{value:?}");
    let cloned = value.clone();
    assert_eq!(value, cloned);
});
