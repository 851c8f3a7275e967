//! `OptionSpec` and its registration-time builder.

use crate::convert::Converter;
use crate::spec::ids::{DomainId, OptionId};
use crate::value::TypedValue;

/// How many times an option may be bound, and what shape the bound value
/// takes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    /// At most one occurrence.
    Single,
    /// Every occurrence is kept, in order.
    List,
    /// Every occurrence is kept, de-duplicated preserving first-seen order.
    Set,
    /// No values are stored; the arity IS the occurrence count.
    Count,
}

/// Whether an option consumes the next token as its value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RequiresValue {
    /// Always consumes a value (a `MissingValue` error if none is available).
    Always,
    /// Never consumes a value; it is a pure flag.
    Never,
    /// Decided per-invocation by the Scanner/Binder's type-aware heuristic.
    Auto,
}

/// The immutable description of one option, as frozen into an
/// [`crate::spec::ArgsSpec`].
#[derive(Clone)]
pub struct OptionSpec {
    pub(crate) id: OptionId,
    pub(crate) owner_name: String,
    pub(crate) switches: Vec<String>,
    pub(crate) arity: Arity,
    pub(crate) converter: Converter,
    pub(crate) default: Option<TypedValue>,
    pub(crate) env_var: Option<String>,
    pub(crate) required: bool,
    pub(crate) hidden: bool,
    pub(crate) eager: bool,
    pub(crate) negatable: bool,
    pub(crate) requires_value: RequiresValue,
    pub(crate) allowed_domains: Vec<DomainId>,
}

impl OptionSpec {
    #[must_use]
    pub const fn id(&self) -> OptionId {
        self.id
    }

    #[must_use]
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    #[must_use]
    pub fn switches(&self) -> &[String] {
        &self.switches
    }

    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    #[must_use]
    pub const fn converter(&self) -> &Converter {
        &self.converter
    }

    #[must_use]
    pub fn env_var_name(&self) -> Option<&str> {
        self.env_var.as_deref()
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&TypedValue> {
        self.default.as_ref()
    }

    #[must_use]
    pub const fn requires_value(&self) -> RequiresValue {
        self.requires_value
    }

    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn is_eager(&self) -> bool {
        self.eager
    }

    #[must_use]
    pub const fn is_negatable(&self) -> bool {
        self.negatable
    }

    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self.converter.expected(), "bool")
    }

    /// `true` when `switch` matches one of this option's triggers, or (for
    /// a negatable boolean) its `--no-<base>` inverse.
    #[must_use]
    pub fn matches_switch(&self, switch: &str) -> bool {
        self.switches.iter().any(|s| s == switch) || self.negated_switch().as_deref() == Some(switch)
    }

    /// The `--no-<base>` form of this option's primary long switch, if it is
    /// negatable.
    #[must_use]
    pub fn negated_switch(&self) -> Option<String> {
        if !self.negatable {
            return None;
        }
        self.switches
            .iter()
            .find(|s| s.starts_with("--"))
            .map(|long| format!("--no-{}", &long[2..]))
    }

    #[must_use]
    pub fn allowed_in_domain(&self, domain: Option<DomainId>) -> bool {
        self.allowed_domains.is_empty() || domain.is_some_and(|d| self.allowed_domains.contains(&d))
    }
}

/// Consuming builder for an [`OptionSpec`], mirroring this corpus's
/// `with_*`-chained provider builders.
pub struct OptionBuilder {
    owner_name: String,
    switches: Vec<String>,
    arity: Arity,
    converter: Converter,
    default: Option<TypedValue>,
    env_var: Option<String>,
    required: bool,
    hidden: bool,
    eager: bool,
    negatable: bool,
    requires_value: RequiresValue,
    allowed_domains: Vec<DomainId>,
}

impl OptionBuilder {
    #[must_use]
    pub fn new(owner_name: impl Into<String>) -> Self {
        Self {
            owner_name: owner_name.into(),
            switches: Vec::new(),
            arity: Arity::Single,
            converter: Converter::string(),
            default: None,
            env_var: None,
            required: false,
            hidden: false,
            eager: false,
            negatable: false,
            requires_value: RequiresValue::Auto,
            allowed_domains: Vec::new(),
        }
    }

    #[must_use]
    pub fn switches(mut self, switches: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.switches.extend(switches.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    #[must_use]
    pub fn int(self) -> Self {
        self.converter(Converter::int())
    }

    #[must_use]
    pub fn long(self) -> Self {
        self.converter(Converter::long())
    }

    #[must_use]
    pub fn double(self) -> Self {
        self.converter(Converter::double())
    }

    #[must_use]
    pub fn bool(self) -> Self {
        self.converter(Converter::bool())
    }

    #[must_use]
    pub fn string(self) -> Self {
        self.converter(Converter::string())
    }

    #[must_use]
    pub fn path(self) -> Self {
        self.converter(Converter::path())
    }

    #[must_use]
    pub fn one_of(self, choices: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.converter(Converter::one_of(choices))
    }

    #[must_use]
    pub fn list(mut self) -> Self {
        self.arity = Arity::List;
        self
    }

    #[must_use]
    pub fn set(mut self) -> Self {
        self.arity = Arity::Set;
        self
    }

    #[must_use]
    pub fn count(mut self) -> Self {
        self.arity = Arity::Count;
        self
    }

    #[must_use]
    pub fn default(mut self, value: impl Into<TypedValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn from_env(mut self, var: impl Into<String>) -> Self {
        self.env_var = Some(var.into());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn eager(mut self) -> Self {
        self.eager = true;
        self
    }

    #[must_use]
    pub fn negatable(mut self) -> Self {
        self.negatable = true;
        self
    }

    #[must_use]
    pub fn requires_value(mut self, hint: RequiresValue) -> Self {
        self.requires_value = hint;
        self
    }

    #[must_use]
    pub fn only_in_domains(mut self, domains: impl IntoIterator<Item = DomainId>) -> Self {
        self.allowed_domains.extend(domains);
        self
    }

    pub(crate) fn build(self, id: OptionId) -> OptionSpec {
        OptionSpec {
            id,
            owner_name: self.owner_name,
            switches: self.switches,
            arity: self.arity,
            converter: self.converter,
            default: self.default,
            env_var: self.env_var,
            required: self.required,
            hidden: self.hidden,
            eager: self.eager,
            negatable: self.negatable,
            requires_value: self.requires_value,
            allowed_domains: self.allowed_domains,
        }
    }
}
