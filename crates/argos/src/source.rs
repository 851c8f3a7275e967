//! Value-source attribution.
//!
//! Every bound option or positional carries a [`ValueSource`] tag recording
//! where its final value came from. Constraint predicates and the
//! [`crate::surface::Bindings::value_source_of`] query both read this tag;
//! it is never inferred after the fact, only assigned once by the
//! Scanner/Binder as it finalizes each binding.

use std::fmt::{self, Display, Formatter};

/// Where a bound value ultimately came from.
///
/// Precedence (high to low) is `User > Environment > Default > Missing`: a
/// `User` occurrence is never demoted by a later, lower-priority source.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ValueSource {
    /// No occurrence, no environment variable, no default.
    Missing,
    /// Value came from the option's compile-time default.
    Default,
    /// Value came from a resolved, non-empty environment variable.
    Environment,
    /// Value came from at least one argv or argument-file occurrence.
    User,
}

impl ValueSource {
    /// `true` for [`ValueSource::User`] — the only source presence-conditional
    /// constraints treat as "present".
    #[must_use]
    pub const fn is_user(self) -> bool {
        matches!(self, Self::User)
    }

    /// `true` for anything other than [`ValueSource::User`] — what
    /// presence-conditional constraints treat as "absent".
    #[must_use]
    pub const fn is_absent(self) -> bool {
        !self.is_user()
    }
}

impl Display for ValueSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Default => write!(f, "default"),
            Self::Environment => write!(f, "environment"),
            Self::User => write!(f, "user"),
        }
    }
}
