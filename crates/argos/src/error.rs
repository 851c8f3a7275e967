//! The `ParseError` taxonomy returned by [`crate::ArgsParser::parse`].
//!
//! Every failure path in the crate — a bad token, a converter rejection, a
//! violated constraint — surfaces as exactly one [`ParseError`] variant. Each
//! variant carries a stable [`miette::Diagnostic`] code and, where it helps,
//! a `#[help]` string, following the same `thiserror` + `miette` pairing this
//! corpus's own provider error type uses.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error as ThisError;

/// The coarse category of a [`ParseError`], useful for callers that want to
/// branch on failure kind without matching the full message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    UnknownOption,
    MissingValue,
    InvalidValue,
    DuplicateOption,
    MissingRequired,
    MissingPositional,
    UnexpectedPositional,
    ConstraintViolation,
    OptionNotAllowedInDomain,
    ArgumentFile,
    UninitializedProperty,
}

/// All the ways a parse can fail.
///
/// Sub-message fragments ("provided multiple times", "is not allowed", "is
/// required", "has wrong value", "absent", "Unexpected positional argument",
/// "Cannot read argument file", "not initialized") are a test contract: do
/// not reword them without checking the property and scenario tests.
#[derive(Debug, ThisError, Diagnostic)]
pub enum ParseError {
    /// An unrecognized switch was encountered.
    #[error("unknown option `{switch}`")]
    #[diagnostic(code(argos::unknown_option))]
    UnknownOption {
        /// The raw switch text as typed (e.g. `--fooo`).
        switch: String,
    },

    /// An option that requires a value had none available.
    #[error("option `{owner}` requires a value but none was provided")]
    #[diagnostic(code(argos::missing_value))]
    MissingValue {
        /// The option's `ownerName`.
        owner: String,
    },

    /// A converter rejected a raw token.
    #[error("invalid value for `{owner}`: {raw:?} is not a valid {expected}")]
    #[diagnostic(code(argos::invalid_value))]
    InvalidValue {
        /// The option's `ownerName`.
        owner: String,
        /// The raw string that failed to convert, verbatim.
        raw: String,
        /// Human name of the expected type (e.g. `"int"`).
        expected: String,
    },

    /// A `Single`-arity option received a second USER occurrence.
    #[error("option `{switch}` provided multiple times")]
    #[diagnostic(code(argos::duplicate_option))]
    DuplicateOption {
        /// The switch as it appeared the second time.
        switch: String,
    },

    /// A required option never received a USER value.
    #[error("option `{switch}` is required")]
    #[diagnostic(code(argos::missing_required))]
    MissingRequired {
        /// The option's primary switch or owner name.
        switch: String,
    },

    /// A required positional slot was never filled.
    #[error("missing required positional argument `{owner}`")]
    #[diagnostic(code(argos::missing_positional))]
    MissingPositional {
        /// The positional's `ownerName`.
        owner: String,
    },

    /// More positional tokens remained than the spec has slots for.
    #[error("Unexpected positional argument: {value:?}")]
    #[diagnostic(code(argos::unexpected_positional))]
    UnexpectedPositional {
        /// The first extra positional token encountered.
        value: String,
    },

    /// A cardinality, conflict, or conditional constraint failed.
    #[error("{message}")]
    #[diagnostic(code(argos::constraint_violation))]
    ConstraintViolation {
        /// Fully rendered message; fragments are stable, see struct docs.
        message: String,
    },

    /// An option was used outside the domains it is restricted to.
    #[error("option `{switch}` is not allowed in domain `{domain}`")]
    #[diagnostic(code(argos::option_not_allowed_in_domain))]
    OptionNotAllowedInDomain {
        /// The option's primary switch.
        switch: String,
        /// The currently active domain identifier.
        domain: String,
    },

    /// An `@file` token referenced a file that could not be read.
    #[error("Cannot read argument file {path}: {message}")]
    #[diagnostic(code(argos::argument_file))]
    ArgumentFile {
        /// The literal path as it appeared in the token.
        path: PathBuf,
        /// The underlying I/O error text.
        message: String,
    },

    /// A required-typed accessor was read after an eager exit prevented
    /// binding.
    #[error("property `{owner}` is not initialized")]
    #[diagnostic(code(argos::uninitialized_property))]
    UninitializedProperty {
        /// The accessor's `ownerName`.
        owner: String,
    },

    /// Several diagnostics accumulated during [`crate::ArgsSpec::parse_accumulating`].
    #[error("{} configuration error(s) occurred", .errors.len())]
    #[diagnostic(code(argos::multiple))]
    Multiple {
        #[related]
        errors: Vec<ParseError>,
    },
}

impl ParseError {
    /// Coarse category for callers that want to branch without matching the
    /// full variant.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownOption { .. } => ErrorKind::UnknownOption,
            Self::MissingValue { .. } => ErrorKind::MissingValue,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::DuplicateOption { .. } => ErrorKind::DuplicateOption,
            Self::MissingRequired { .. } => ErrorKind::MissingRequired,
            Self::MissingPositional { .. } => ErrorKind::MissingPositional,
            Self::UnexpectedPositional { .. } => ErrorKind::UnexpectedPositional,
            Self::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            Self::OptionNotAllowedInDomain { .. } => ErrorKind::OptionNotAllowedInDomain,
            Self::ArgumentFile { .. } => ErrorKind::ArgumentFile,
            Self::UninitializedProperty { .. } => ErrorKind::UninitializedProperty,
            Self::Multiple { .. } => ErrorKind::ConstraintViolation,
        }
    }

    /// Collects multiple errors into a single [`ParseError::Multiple`].
    ///
    /// Returns `None` if `errors` is empty; unwraps to the single error if
    /// there is exactly one, mirroring the collapsing behavior this corpus's
    /// config-loading teacher uses for its own error accumulation.
    #[must_use]
    pub fn multiple(errors: Vec<ParseError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.into_iter().next(),
            _ => Some(Self::Multiple { errors }),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_option_message_contains_stable_fragment() {
        let err = ParseError::DuplicateOption {
            switch: "--count".into(),
        };
        assert!(err.to_string().contains("provided multiple times"));
    }

    #[test]
    fn unexpected_positional_message_contains_stable_fragment() {
        let err = ParseError::UnexpectedPositional {
            value: "extra".into(),
        };
        assert!(err.to_string().contains("Unexpected positional argument"));
    }

    #[test]
    fn uninitialized_property_message_contains_owner_and_fragment() {
        let err = ParseError::UninitializedProperty {
            owner: "requiredString".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("requiredString"));
        assert!(msg.contains("not initialized"));
    }

    #[test]
    fn argument_file_message_contains_stable_fragment_and_path() {
        let err = ParseError::ArgumentFile {
            path: PathBuf::from("/tmp/missing.args"),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Cannot read argument file"));
        assert!(msg.contains("/tmp/missing.args"));
    }

    #[test]
    fn invalid_value_message_embeds_raw_token_verbatim() {
        let err = ParseError::InvalidValue {
            owner: "count".into(),
            raw: "1.5".into(),
            expected: "int".into(),
        };
        assert!(err.to_string().contains("\"1.5\""));
    }

    #[test]
    fn multiple_empty_is_none() {
        assert!(ParseError::multiple(vec![]).is_none());
    }

    #[test]
    fn multiple_single_unwraps() {
        let err = ParseError::multiple(vec![ParseError::MissingValue {
            owner: "x".into(),
        }])
        .unwrap();
        assert!(matches!(err, ParseError::MissingValue { .. }));
    }

    #[test]
    fn multiple_many_wraps() {
        let err = ParseError::multiple(vec![
            ParseError::MissingValue { owner: "a".into() },
            ParseError::MissingValue { owner: "b".into() },
        ])
        .unwrap();
        assert!(matches!(err, ParseError::Multiple { .. }));
    }
}
