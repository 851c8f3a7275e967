//! Value converters.
//!
//! A [`Converter`] turns one raw token into a [`TypedValue`], or rejects it.
//! Converters are plain data — an [`Arc`]-wrapped closure plus a little
//! metadata the Scanner/Binder's value-requirement heuristic (§4.4) needs to
//! decide, without yet committing to a conversion, whether a peeked token
//! "looks like" something this option would accept.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::value::TypedValue;

/// A raw token that a [`Converter`] rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertError {
    /// The raw string verbatim, as required by `ErrorKind::InvalidValue`.
    pub raw: String,
    /// Human name of the expected type, e.g. `"int"`.
    pub expected: &'static str,
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not a valid {}", self.raw, self.expected)
    }
}

impl std::error::Error for ConvertError {}

type ConvertFn = Arc<dyn Fn(&str) -> Result<TypedValue, ConvertError> + Send + Sync>;

/// Whether a converter is "string-like" for the purposes of the Auto
/// value-requirement heuristic: a string-like converter accepts any
/// non-option token as a value, so the scanner never has to try-and-fail
/// before consuming it. Numeric, boolean, `oneOf`, and `enum` converters are
/// not string-like — a failed conversion there means "this wasn't meant for
/// me", not "reject the whole parse".
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConverterShape {
    StringLike,
    Typed,
}

/// A pluggable `String -> TypedValue` conversion, attached to an
/// [`crate::spec::OptionSpec`] or [`crate::spec::PositionalSpec`].
#[derive(Clone)]
pub struct Converter {
    expected: &'static str,
    shape: ConverterShape,
    func: ConvertFn,
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("expected", &self.expected)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

impl Converter {
    fn new(
        expected: &'static str,
        shape: ConverterShape,
        func: impl Fn(&str) -> Result<TypedValue, ConvertError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            expected,
            shape,
            func: Arc::new(func),
        }
    }

    /// Human name of the expected type, used in `InvalidValue` messages.
    #[must_use]
    pub const fn expected(&self) -> &'static str {
        self.expected
    }

    #[must_use]
    pub const fn shape(&self) -> ConverterShape {
        self.shape
    }

    #[must_use]
    pub const fn is_string_like(&self) -> bool {
        matches!(self.shape, ConverterShape::StringLike)
    }

    /// Whether this converter accepts numeric literals (`int`/`long`/
    /// `double`). Used by the Auto value-requirement heuristic (§4.4) to
    /// restrict the "leading `-` is actually a negative number" rescue to
    /// options that could plausibly mean one — a `string()`/`oneOf()`/
    /// `bool()` option never gets to claim a token that looks like a switch.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self.expected, "int" | "long" | "double")
    }

    /// Converts `raw`, producing a typed value or an error carrying `raw`
    /// verbatim.
    pub fn convert(&self, raw: &str) -> Result<TypedValue, ConvertError> {
        (self.func)(raw)
    }

    /// Non-committing probe used by the value-requirement heuristic: does
    /// `raw` convert successfully under this converter?
    #[must_use]
    pub fn probe(&self, raw: &str) -> bool {
        self.convert(raw).is_ok()
    }

    /// The identity conversion. String-like: the Auto heuristic always
    /// consumes the next token for a `string()` option.
    #[must_use]
    pub fn string() -> Self {
        Self::new(
            "string",
            ConverterShape::StringLike,
            |raw| Ok(TypedValue::Str(raw.to_string())),
        )
    }

    /// Filesystem path conversion. String-like for the same reason as
    /// `string()`; only rejects the empty token.
    #[must_use]
    pub fn path() -> Self {
        Self::new("path", ConverterShape::StringLike, |raw| {
            if raw.is_empty() {
                Err(ConvertError {
                    raw: raw.to_string(),
                    expected: "path",
                })
            } else {
                Ok(TypedValue::Str(PathBuf::from(raw).display().to_string()))
            }
        })
    }

    /// Signed decimal integer. Rejects scientific notation, hex, and a
    /// leading `0x`/`0o`/`0b`. Accepts an optional leading `+`.
    #[must_use]
    pub fn int() -> Self {
        Self::new("int", ConverterShape::Typed, |raw| {
            parse_int(raw)
                .map(TypedValue::Int)
                .ok_or_else(|| ConvertError {
                    raw: raw.to_string(),
                    expected: "int",
                })
        })
    }

    /// Alias of [`Converter::int`] for 64-bit-explicit specs; the Rust port
    /// has no narrower native `int`, so `long` and `int` share an
    /// implementation (see SPEC_FULL.md §4.3).
    #[must_use]
    pub fn long() -> Self {
        Self::new("long", ConverterShape::Typed, |raw| {
            parse_int(raw)
                .map(TypedValue::Int)
                .ok_or_else(|| ConvertError {
                    raw: raw.to_string(),
                    expected: "long",
                })
        })
    }

    /// IEEE double, including `Infinity` / `-Infinity` / `NaN`. Rejects
    /// multiple `.` characters (`str::parse` would otherwise just fail on
    /// those anyway, but this keeps the rejection reason explicit).
    #[must_use]
    pub fn double() -> Self {
        Self::new("double", ConverterShape::Typed, |raw| {
            if raw.matches('.').count() > 1 {
                return Err(ConvertError {
                    raw: raw.to_string(),
                    expected: "double",
                });
            }
            match raw {
                "Infinity" => Ok(TypedValue::Float(f64::INFINITY)),
                "-Infinity" => Ok(TypedValue::Float(f64::NEG_INFINITY)),
                "NaN" => Ok(TypedValue::Float(f64::NAN)),
                _ => raw
                    .parse::<f64>()
                    .map(TypedValue::Float)
                    .map_err(|_| ConvertError {
                        raw: raw.to_string(),
                        expected: "double",
                    }),
            }
        })
    }

    /// Case-insensitive boolean literal set: `true/false`, `1/0`,
    /// `yes/no`, `on/off`.
    #[must_use]
    pub fn bool() -> Self {
        Self::new("bool", ConverterShape::Typed, |raw| {
            parse_bool(raw)
                .map(TypedValue::Bool)
                .ok_or_else(|| ConvertError {
                    raw: raw.to_string(),
                    expected: "bool",
                })
        })
    }

    /// Case-sensitive membership in a fixed set of raw strings.
    #[must_use]
    pub fn one_of(choices: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        Self::new("one of the allowed values", ConverterShape::Typed, move |raw| {
            if choices.iter().any(|c| c == raw) {
                Ok(TypedValue::Str(raw.to_string()))
            } else {
                Err(ConvertError {
                    raw: raw.to_string(),
                    expected: "one of the allowed values",
                })
            }
        })
    }

    /// Case-sensitive membership against a fixed enum member-name list,
    /// with a typed mapping applied to the matched index.
    #[must_use]
    pub fn enum_of<T>(members: impl IntoIterator<Item = (impl Into<String>, T)>) -> Self
    where
        T: Into<TypedValue> + Clone + Send + Sync + 'static,
    {
        let members: Vec<(String, T)> = members.into_iter().map(|(n, v)| (n.into(), v)).collect();
        Self::new("enum member", ConverterShape::Typed, move |raw| {
            members
                .iter()
                .find(|(name, _)| name == raw)
                .map(|(_, value)| value.clone().into())
                .ok_or_else(|| ConvertError {
                    raw: raw.to_string(),
                    expected: "enum member",
                })
        })
    }

    /// Wraps a user-supplied fallible mapping function. Typed by default —
    /// callers who want the any-token Auto behavior of `string()` should
    /// call [`Converter::map_string_like`] instead.
    pub fn map<F>(expected: &'static str, f: F) -> Self
    where
        F: Fn(&str) -> Option<TypedValue> + Send + Sync + 'static,
    {
        Self::new(expected, ConverterShape::Typed, move |raw| {
            f(raw).ok_or_else(|| ConvertError {
                raw: raw.to_string(),
                expected,
            })
        })
    }

    /// Like [`Converter::map`], but string-like for the Auto heuristic.
    pub fn map_string_like<F>(expected: &'static str, f: F) -> Self
    where
        F: Fn(&str) -> Option<TypedValue> + Send + Sync + 'static,
    {
        Self::new(expected, ConverterShape::StringLike, move |raw| {
            f(raw).ok_or_else(|| ConvertError {
                raw: raw.to_string(),
                expected,
            })
        })
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.strip_prefix('+').unwrap_or(raw);
    if trimmed.is_empty() {
        return None;
    }
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_rejects_scientific_notation_and_hex() {
        let c = Converter::int();
        assert!(c.convert("1e10").is_err());
        assert!(c.convert("0x1F").is_err());
        assert!(c.convert("+42").is_ok());
        assert_eq!(c.convert("-7").unwrap(), TypedValue::Int(-7));
    }

    #[test]
    fn double_accepts_scientific_notation_and_specials() {
        let c = Converter::double();
        assert!(c.convert("1e10").is_ok());
        assert_eq!(c.convert("Infinity").unwrap(), TypedValue::Float(f64::INFINITY));
        assert!(matches!(c.convert("NaN").unwrap(), TypedValue::Float(f) if f.is_nan()));
        assert!(c.convert("1.2.3").is_err());
    }

    #[test]
    fn bool_recognizes_all_literal_forms_case_insensitively() {
        let c = Converter::bool();
        for (tok, expected) in [
            ("true", true),
            ("TRUE", true),
            ("1", true),
            ("yes", true),
            ("ON", true),
            ("false", false),
            ("0", false),
            ("no", false),
            ("Off", false),
        ] {
            assert_eq!(c.convert(tok).unwrap(), TypedValue::Bool(expected), "{tok}");
        }
        assert!(c.convert("maybe").is_err());
    }

    #[test]
    fn one_of_is_case_sensitive() {
        let c = Converter::one_of(["debug", "info", "warn"]);
        assert!(c.convert("debug").is_ok());
        assert!(c.convert("Debug").is_err());
    }

    #[test]
    fn invalid_value_error_embeds_raw_token() {
        let c = Converter::int();
        let err = c.convert("1.5").unwrap_err();
        assert_eq!(err.raw, "1.5");
    }

    #[test]
    fn string_and_path_are_string_like_others_are_not() {
        assert!(Converter::string().is_string_like());
        assert!(Converter::path().is_string_like());
        assert!(!Converter::int().is_string_like());
        assert!(!Converter::bool().is_string_like());
        assert!(!Converter::one_of(["a"]).is_string_like());
    }
}
