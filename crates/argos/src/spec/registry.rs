//! `ArgsSpec` — the frozen registry the Scanner/Binder, Domain Resolver, and
//! Constraint Engine all read from.

use crate::spec::constraint::{ConstraintKind, ConstraintSpec};
use crate::spec::domain::{DomainBuilder, DomainSpec};
use crate::spec::ids::{DomainId, OptionId, PositionalId};
use crate::spec::option::{OptionBuilder, OptionSpec};
use crate::spec::positional::{PositionalBuilder, PositionalSpec};

/// The registered, frozen description of a command line: its options,
/// positionals, domains, and cross-option constraints.
///
/// Built once via [`ArgsSpec::new`] and the `add_*` methods, then consumed
/// read-only by every call to [`crate::ArgsParser::parse`] — per the Design
/// Notes' lifecycle rule, a single `ArgsSpec` may drive any number of
/// independent parses.
#[derive(Clone)]
pub struct ArgsSpec {
    options: Vec<OptionSpec>,
    positionals: Vec<PositionalSpec>,
    domains: Vec<DomainSpec>,
    constraints: Vec<ConstraintSpec>,
    argument_file_prefix: Option<char>,
}

impl Default for ArgsSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgsSpec {
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            positionals: Vec::new(),
            domains: Vec::new(),
            constraints: Vec::new(),
            argument_file_prefix: Some('@'),
        }
    }

    /// Overrides the `@file` expansion prefix (`None` disables expansion).
    pub fn set_argument_file_prefix(&mut self, prefix: Option<char>) -> &mut Self {
        self.argument_file_prefix = prefix;
        self
    }

    #[must_use]
    pub const fn argument_file_prefix(&self) -> Option<char> {
        self.argument_file_prefix
    }

    pub fn add_option(&mut self, builder: OptionBuilder) -> OptionId {
        let id = OptionId(self.options.len());
        self.options.push(builder.build(id));
        id
    }

    pub fn add_positional(&mut self, builder: PositionalBuilder) -> PositionalId {
        let id = PositionalId(self.positionals.len());
        self.positionals.push(builder.build(id));
        id
    }

    pub fn add_domain(&mut self, builder: DomainBuilder) -> DomainId {
        let id = DomainId(self.domains.len());
        self.domains.push(builder.build(id));
        id
    }

    /// Registers a constraint. `OnlyInDomains` is special-cased: rather than
    /// becoming a runtime constraint the engine evaluates, it widens the
    /// target [`OptionSpec`]'s allowed-domain set directly, since domain
    /// gating (§4.6 pass 2) reads that set from the option itself.
    pub fn add_constraint(&mut self, constraint: ConstraintSpec) {
        if let ConstraintKind::OnlyInDomains(target, domains) = &constraint.kind {
            if let Some(opt) = self.options.get_mut(target.index()) {
                opt.allowed_domains.extend(domains.iter().copied());
            }
            return;
        }
        self.constraints.push(constraint);
    }

    #[must_use]
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    #[must_use]
    pub fn positionals(&self) -> &[PositionalSpec] {
        &self.positionals
    }

    #[must_use]
    pub fn domains(&self) -> &[DomainSpec] {
        &self.domains
    }

    #[must_use]
    pub fn constraints(&self) -> &[ConstraintSpec] {
        &self.constraints
    }

    #[must_use]
    pub fn option(&self, id: OptionId) -> &OptionSpec {
        &self.options[id.index()]
    }

    #[must_use]
    pub fn positional(&self, id: PositionalId) -> &PositionalSpec {
        &self.positionals[id.index()]
    }

    #[must_use]
    pub fn domain(&self, id: DomainId) -> &DomainSpec {
        &self.domains[id.index()]
    }

    /// Resolves a literal switch token (e.g. `--verbose`, `-v`, or
    /// `--no-verbose` for a negatable boolean) to its owning option.
    #[must_use]
    pub fn find_by_switch(&self, switch: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.matches_switch(switch))
    }

    /// Resolves a single short character (`x` from `-x`) to its owning
    /// option, for cluster decomposition.
    #[must_use]
    pub fn find_by_short_char(&self, ch: char) -> Option<&OptionSpec> {
        let short = format!("-{ch}");
        self.find_by_switch(&short)
    }

    #[must_use]
    pub fn find_domain(&self, token: &str) -> Option<&DomainSpec> {
        self.domains.iter().find(|d| d.matches(token))
    }
}
