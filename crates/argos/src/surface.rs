//! The Binding Surface: read-only accessors over a completed parse. See
//! SPEC_FULL.md §4.7.

use crate::binding::BindingTable;
use crate::error::ParseError;
use crate::source::ValueSource;
use crate::spec::{ArgsSpec, Arity, DomainSpec, OptionId, PositionalId};
use crate::value::TypedValue;

/// The immutable result of a successful [`crate::ArgsParser::parse`] call.
///
/// Holds only owned, `Send + Sync` data, so once a parse completes a
/// `Bindings` may be shared and read from any number of threads (§5).
pub struct Bindings {
    spec: ArgsSpec,
    table: BindingTable,
    positionals: Vec<Vec<TypedValue>>,
}

impl Bindings {
    pub(crate) fn new(spec: ArgsSpec, table: BindingTable, positionals: Vec<Vec<TypedValue>>) -> Self {
        Self { spec, table, positionals }
    }

    /// The frozen spec this binding was produced from, for external help
    /// renderers or other collaborators.
    #[must_use]
    pub fn snapshot(&self) -> &ArgsSpec {
        &self.spec
    }

    #[must_use]
    pub fn active_domain(&self) -> Option<&DomainSpec> {
        self.table.active_domain().map(|d| self.spec.domain(d))
    }

    /// Final [`ValueSource`] for an option.
    #[must_use]
    pub fn value_source_of(&self, id: OptionId) -> ValueSource {
        self.table.option(id).source()
    }

    /// A nullable single value: `None` for `ValueSource::Missing` (no
    /// default, no env, no user occurrence).
    #[must_use]
    pub fn get(&self, id: OptionId) -> Option<TypedValue> {
        self.table.option(id).values().first().cloned()
    }

    /// A required (or defaulted) single value.
    ///
    /// # Errors
    ///
    /// [`ParseError::UninitializedProperty`] if an eager exit prevented
    /// binding before this accessor's value would otherwise have been
    /// populated.
    pub fn require(&self, id: OptionId) -> Result<TypedValue, ParseError> {
        self.get(id).ok_or_else(|| ParseError::UninitializedProperty {
            owner: self.spec.option(id).owner_name().to_string(),
        })
    }

    /// All values for a `List`/`Set` option, empty when `Missing`.
    #[must_use]
    pub fn list(&self, id: OptionId) -> &[TypedValue] {
        self.table.option(id).values()
    }

    /// Occurrence count for a `Count`-arity option.
    #[must_use]
    pub fn count(&self, id: OptionId) -> usize {
        debug_assert!(matches!(self.spec.option(id).arity(), Arity::Count));
        self.table.option(id).user_occurrence_count()
    }

    /// A nullable positional value, falling back to its declared default.
    #[must_use]
    pub fn positional(&self, id: PositionalId) -> Option<TypedValue> {
        self.positionals
            .get(id.index())
            .and_then(|v| v.first().cloned())
            .or_else(|| self.spec.positional(id).default_value().cloned())
    }

    /// All values bound to a `List`-arity positional.
    #[must_use]
    pub fn positional_list(&self, id: PositionalId) -> &[TypedValue] {
        self.positionals.get(id.index()).map_or(&[], Vec::as_slice)
    }
}
