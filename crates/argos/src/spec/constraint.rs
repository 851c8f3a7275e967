//! The cross-option constraint vocabulary.
//!
//! Constraints are plain data attached to a frozen [`crate::spec::ArgsSpec`]
//! and evaluated by the Constraint Engine in the fixed pass order described
//! in SPEC_FULL.md §4.6. `RequireIfValue`/`AllowOnlyIfValue` predicates are
//! the one place this crate is dynamically typed: they are written against
//! [`TypedValue`] rather than a generic `T`, per the Design Notes'
//! "dynamic typing at the predicate boundary" decision.

use std::sync::Arc;

use crate::spec::ids::{DomainId, OptionId};
use crate::value::TypedValue;

/// A pure predicate over a referenced option's typed value.
pub type ValuePredicate = Arc<dyn Fn(&TypedValue) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum ConstraintKind {
    /// `target` must end with a `User` value-source.
    Required(OptionId),
    /// `target`'s occurrence count must be `>= n`.
    AtLeast(OptionId, usize),
    /// `target`'s occurrence count must be `<= n`.
    AtMost(OptionId, usize),
    /// Exactly one of `targets` may be user-present.
    ExactlyOne(Vec<OptionId>),
    /// At least one of `targets` must be user-present.
    AtLeastOne(Vec<OptionId>),
    /// At most one of `targets` may be user-present.
    AtMostOne(Vec<OptionId>),
    /// `a` and `b` may not both be user-present.
    Conflicts(OptionId, OptionId),
    /// `target` may not be user-present alongside any of `others`.
    ConflictsWith(OptionId, Vec<OptionId>),
    /// If any of `refs` is user-present, `target` must be too.
    RequireIfAnyPresent(OptionId, Vec<OptionId>),
    /// If all of `refs` are user-present, `target` must be too.
    RequireIfAllPresent(OptionId, Vec<OptionId>),
    /// If any of `refs` is absent, `target` must be user-present.
    RequireIfAnyAbsent(OptionId, Vec<OptionId>),
    /// If all of `refs` are absent, `target` must be user-present.
    RequireIfAllAbsent(OptionId, Vec<OptionId>),
    /// If `predicate` holds for `reference`'s typed value, `target` must be
    /// user-present.
    RequireIfValue {
        target: OptionId,
        reference: OptionId,
        predicate: ValuePredicate,
    },
    /// `target` may be user-present only if `predicate` holds for
    /// `reference`'s typed value.
    AllowOnlyIfValue {
        target: OptionId,
        reference: OptionId,
        predicate: ValuePredicate,
    },
    /// `target` is legal only within `domains`. Folded into the option's
    /// own allowed-domain set at registration time rather than kept as a
    /// runtime constraint; see [`crate::spec::ArgsSpec::add_constraint`].
    OnlyInDomains(OptionId, Vec<DomainId>),
}

/// A [`ConstraintKind`] plus the domain it is scoped to, if any. `None`
/// means the constraint is global and always evaluated.
#[derive(Clone)]
pub struct ConstraintSpec {
    pub(crate) kind: ConstraintKind,
    pub(crate) domain: Option<DomainId>,
}

impl ConstraintSpec {
    #[must_use]
    pub const fn new(kind: ConstraintKind) -> Self {
        Self { kind, domain: None }
    }

    #[must_use]
    pub fn scoped_to(mut self, domain: DomainId) -> Self {
        self.domain = Some(domain);
        self
    }

    #[must_use]
    pub const fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// `true` when this constraint applies under `active_domain` (global
    /// constraints always apply).
    #[must_use]
    pub fn active_in(&self, active_domain: Option<DomainId>) -> bool {
        match self.domain {
            None => true,
            Some(d) => active_domain == Some(d),
        }
    }
}
