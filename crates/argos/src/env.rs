//! The environment-lookup seam.
//!
//! The Scanner/Binder never calls `std::env::var` directly. It goes through
//! an [`EnvLookup`] trait object instead — the same shape as this corpus's
//! `Provider` abstraction for configuration sources, narrowed down to the
//! one read-only operation the spec actually needs. Production callers use
//! [`ProcessEnv`]; tests substitute [`MapEnv`] so environment-dependent
//! assertions never have to mutate (and race on) the real process
//! environment.

use std::collections::HashMap;

/// A read-only environment-variable lookup.
///
/// Per §4.4, an undefined or empty variable is treated as absent — the
/// default implementation of this trait's sole consumer, the Scanner/
/// Binder, folds `Some(String::new())` down to `None` itself, so
/// implementors need only report what is actually set.
pub trait EnvLookup: Send + Sync {
    /// Returns the variable's value, or `None` if it is unset.
    fn lookup(&self, var: &str) -> Option<String>;
}

/// Reads from the real process environment via [`std::env::var`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, var: &str) -> Option<String> {
        std::env::var(var).ok()
    }
}

/// An in-memory environment substitute for deterministic tests.
#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, var: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(var.into(), value.into());
        self
    }

    pub fn set(&mut self, var: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(var.into(), value.into());
    }
}

impl EnvLookup for MapEnv {
    fn lookup(&self, var: &str) -> Option<String> {
        self.vars.get(var).cloned()
    }
}

impl FromIterator<(String, String)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_env_reports_only_set_vars() {
        let env = MapEnv::new().with("FOO", "bar");
        assert_eq!(env.lookup("FOO"), Some("bar".to_string()));
        assert_eq!(env.lookup("MISSING"), None);
    }

    #[test]
    fn map_env_set_overwrites() {
        let mut env = MapEnv::new();
        env.set("X", "1");
        env.set("X", "2");
        assert_eq!(env.lookup("X"), Some("2".to_string()));
    }
}
