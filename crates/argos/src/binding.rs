//! The Binding Table — mutable state built during a single scan.

use std::collections::HashMap;

use crate::source::ValueSource;
use crate::spec::{ArgsSpec, DomainId};
use crate::value::TypedValue;

/// Index of a token within the expanded token stream, used to order
/// diagnostics and to preserve first-seen positions.
pub type TokenIndex = usize;

/// One raw occurrence of an option on the command line or in an argument
/// file. Argument-file occurrences are indistinguishable from argv ones —
/// both count as [`ValueSource::User`].
#[derive(Clone, Debug)]
pub struct Occurrence {
    pub raw_value: Option<String>,
    pub origin_index: TokenIndex,
}

/// The accumulated state for a single option across a scan.
#[derive(Clone, Debug, Default)]
pub struct OptionBinding {
    pub(crate) occurrences: Vec<Occurrence>,
    pub(crate) values: Vec<TypedValue>,
    pub(crate) source: Option<ValueSource>,
}

impl OptionBinding {
    #[must_use]
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    #[must_use]
    pub fn user_occurrence_count(&self) -> usize {
        self.occurrences.len()
    }

    #[must_use]
    pub fn is_user_present(&self) -> bool {
        !self.occurrences.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[TypedValue] {
        &self.values
    }

    #[must_use]
    pub fn source(&self) -> ValueSource {
        self.source.unwrap_or(ValueSource::Missing)
    }
}

/// The mutable state the Scanner/Binder writes to and the Constraint
/// Engine/Binding Surface read from. Built fresh for each `parse()` call —
/// per the Design Notes' lifecycle rule, a `BindingTable` is never reused
/// across invocations.
#[derive(Clone, Debug)]
pub struct BindingTable {
    options: Vec<OptionBinding>,
    positional_tokens: Vec<(String, TokenIndex)>,
    active_domain: Option<DomainId>,
    end_of_options_seen: bool,
    eager_exit: bool,
}

impl BindingTable {
    #[must_use]
    pub fn new(spec: &ArgsSpec) -> Self {
        Self {
            options: vec![OptionBinding::default(); spec.options().len()],
            positional_tokens: Vec::new(),
            active_domain: None,
            end_of_options_seen: false,
            eager_exit: false,
        }
    }

    #[must_use]
    pub fn option(&self, id: crate::spec::OptionId) -> &OptionBinding {
        &self.options[id.index()]
    }

    pub(crate) fn option_mut(&mut self, id: crate::spec::OptionId) -> &mut OptionBinding {
        &mut self.options[id.index()]
    }

    pub(crate) fn push_positional(&mut self, raw: String, origin_index: TokenIndex) {
        self.positional_tokens.push((raw, origin_index));
    }

    #[must_use]
    pub fn positional_tokens(&self) -> &[(String, TokenIndex)] {
        &self.positional_tokens
    }

    #[must_use]
    pub const fn active_domain(&self) -> Option<DomainId> {
        self.active_domain
    }

    pub(crate) fn set_active_domain(&mut self, domain: DomainId) {
        self.active_domain = Some(domain);
    }

    #[must_use]
    pub const fn end_of_options_seen(&self) -> bool {
        self.end_of_options_seen
    }

    pub(crate) fn set_end_of_options(&mut self) {
        self.end_of_options_seen = true;
    }

    #[must_use]
    pub const fn eager_exit(&self) -> bool {
        self.eager_exit
    }

    pub(crate) fn set_eager_exit(&mut self) {
        self.eager_exit = true;
    }

    /// Resolves each option's final [`ValueSource`] and typed value after
    /// the scan completes, consulting environment lookups and defaults for
    /// options with no user occurrence. See §4.4 "Sources and final
    /// value-source".
    pub(crate) fn finalize_sources(
        &mut self,
        spec: &ArgsSpec,
        env: &dyn crate::env::EnvLookup,
    ) -> Result<(), crate::error::ParseError> {
        for opt in spec.options() {
            let binding = &mut self.options[opt.id().index()];
            if binding.is_user_present() {
                binding.source = Some(ValueSource::User);
                continue;
            }
            if let Some(var) = opt.env_var_name() {
                if let Some(raw) = env.lookup(var) {
                    if !raw.is_empty() {
                        let value = opt.converter().convert(&raw).map_err(|e| {
                            crate::error::ParseError::InvalidValue {
                                owner: opt.owner_name().to_string(),
                                raw: e.raw,
                                expected: e.expected.to_string(),
                            }
                        })?;
                        binding.values.push(value);
                        binding.source = Some(ValueSource::Environment);
                        continue;
                    }
                }
            }
            if let Some(default) = opt.default_value() {
                binding.values.push(default.clone());
                binding.source = Some(ValueSource::Default);
                continue;
            }
            binding.source = Some(ValueSource::Missing);
        }
        Ok(())
    }

    /// A convenience map from [`crate::spec::OptionId`] index to final
    /// [`ValueSource`], used by the Constraint Engine's presence checks.
    #[must_use]
    pub fn sources(&self) -> HashMap<usize, ValueSource> {
        self.options
            .iter()
            .enumerate()
            .map(|(i, b)| (i, b.source()))
            .collect()
    }
}
