//! `PositionalSpec` and its registration-time builder.

use crate::convert::Converter;
use crate::spec::ids::{DomainId, PositionalId};
use crate::value::TypedValue;

/// Positionals only ever take `Single` or `List` arity; the trailing
/// positional may be `List`, absorbing every remaining positional token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PositionalArity {
    Single,
    List,
}

#[derive(Clone)]
pub struct PositionalSpec {
    pub(crate) id: PositionalId,
    pub(crate) owner_name: String,
    pub(crate) arity: PositionalArity,
    pub(crate) converter: Converter,
    pub(crate) default: Option<TypedValue>,
    pub(crate) required: bool,
    pub(crate) allowed_domains: Vec<DomainId>,
}

impl PositionalSpec {
    #[must_use]
    pub const fn id(&self) -> PositionalId {
        self.id
    }

    #[must_use]
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    #[must_use]
    pub const fn arity(&self) -> PositionalArity {
        self.arity
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn converter(&self) -> &Converter {
        &self.converter
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&TypedValue> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn allowed_in_domain(&self, domain: Option<DomainId>) -> bool {
        self.allowed_domains.is_empty() || domain.is_some_and(|d| self.allowed_domains.contains(&d))
    }
}

pub struct PositionalBuilder {
    owner_name: String,
    arity: PositionalArity,
    converter: Converter,
    default: Option<TypedValue>,
    required: bool,
    allowed_domains: Vec<DomainId>,
}

impl PositionalBuilder {
    #[must_use]
    pub fn new(owner_name: impl Into<String>) -> Self {
        Self {
            owner_name: owner_name.into(),
            arity: PositionalArity::Single,
            converter: Converter::string(),
            default: None,
            required: false,
            allowed_domains: Vec::new(),
        }
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
    pub fn path(self) -> Self {
        self.converter(Converter::path())
    }

    #[must_use]
    pub fn one_of(self, choices: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.converter(Converter::one_of(choices))
    }

    #[must_use]
    pub fn list(mut self) -> Self {
        self.arity = PositionalArity::List;
        self
    }

    #[must_use]
    pub fn default(mut self, value: impl Into<TypedValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn only_in_domains(mut self, domains: impl IntoIterator<Item = DomainId>) -> Self {
        self.allowed_domains.extend(domains);
        self
    }

    pub(crate) fn build(self, id: PositionalId) -> PositionalSpec {
        PositionalSpec {
            id,
            owner_name: self.owner_name,
            arity: self.arity,
            converter: self.converter,
            default: self.default,
            required: self.required,
            allowed_domains: self.allowed_domains,
        }
    }
}
