//! `DomainSpec` — sub-command identifiers the first positional may select.

use crate::spec::ids::DomainId;

#[derive(Clone)]
pub struct DomainSpec {
    pub(crate) id: DomainId,
    pub(crate) name: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) label: Option<String>,
}

impl DomainSpec {
    #[must_use]
    pub const fn id(&self) -> DomainId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The display label a help renderer would show for this domain, falling
    /// back to [`Self::name`] when none was set.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }
}

pub struct DomainBuilder {
    name: String,
    aliases: Vec<String>,
    label: Option<String>,
}

impl DomainBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            label: None,
        }
    }

    #[must_use]
    pub fn aliases(mut self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// A human-facing label for help renderers, distinct from the matched
    /// identifier/aliases.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub(crate) fn build(self, id: DomainId) -> DomainSpec {
        DomainSpec {
            id,
            name: self.name,
            aliases: self.aliases,
            label: self.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back_to_name_when_unset() {
        let spec = DomainBuilder::new("build").build(DomainId(0));
        assert_eq!(spec.label(), "build");
    }

    #[test]
    fn explicit_label_overrides_name() {
        let spec = DomainBuilder::new("build").label("Build a target").build(DomainId(0));
        assert_eq!(spec.label(), "Build a target");
        assert_eq!(spec.name(), "build");
    }

    #[test]
    fn matches_name_and_aliases_only() {
        let spec = DomainBuilder::new("build").aliases(["b", "compile"]).build(DomainId(0));
        assert!(spec.matches("build"));
        assert!(spec.matches("b"));
        assert!(spec.matches("compile"));
        assert!(!spec.matches("test"));
    }
}
