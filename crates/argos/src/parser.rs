//! `ArgsParser` — the top-level facade tying Token Source, Scanner/Binder,
//! Domain Resolver, Constraint Engine, and Binding Surface together.

use tracing::instrument;

use crate::argfile;
use crate::binding::BindingTable;
use crate::constraints_engine;
use crate::env::{EnvLookup, ProcessEnv};
use crate::error::ParseError;
use crate::resolver;
use crate::scanner;
use crate::spec::ArgsSpec;
use crate::surface::Bindings;

/// Drives a single parse of a token vector against a frozen [`ArgsSpec`].
///
/// An `ArgsParser` borrows its spec and carries no mutable state of its own;
/// the same spec may drive any number of independent `parse` calls.
pub struct ArgsParser<'spec> {
    spec: &'spec ArgsSpec,
}

impl<'spec> ArgsParser<'spec> {
    #[must_use]
    pub const fn new(spec: &'spec ArgsSpec) -> Self {
        Self { spec }
    }

    /// Parses `argv` against the real process environment, failing fast on
    /// the first error encountered (scan order for parse-time errors, pass
    /// order from §4.6 for constraint errors).
    ///
    /// # Errors
    ///
    /// See [`ParseError`].
    #[instrument(skip(self, argv))]
    pub fn parse(&self, argv: &[String]) -> Result<Bindings, ParseError> {
        self.parse_with_env(argv, &ProcessEnv)
    }

    /// Like [`Self::parse`], but resolves environment variables through a
    /// caller-supplied [`EnvLookup`] instead of the real process
    /// environment.
    ///
    /// # Errors
    ///
    /// See [`ParseError`].
    #[instrument(skip(self, argv, env))]
    pub fn parse_with_env(&self, argv: &[String], env: &dyn EnvLookup) -> Result<Bindings, ParseError> {
        let tokens = argfile::expand_all(argv, self.spec.argument_file_prefix())?;
        let mut table = BindingTable::new(self.spec);
        scanner::scan(self.spec, &tokens, &mut table)?;

        if table.eager_exit() {
            table.finalize_sources(self.spec, env)?;
            let positionals = vec![Vec::new(); self.spec.positionals().len()];
            return Ok(Bindings::new(self.spec.clone(), table, positionals));
        }

        let positionals = resolver::resolve(self.spec, &mut table)?;
        table.finalize_sources(self.spec, env)?;
        constraints_engine::evaluate(self.spec, &table)?;
        Ok(Bindings::new(self.spec.clone(), table, positionals))
    }

    /// Like [`Self::parse`], but collects every diagnostic it can find
    /// instead of stopping at the first one, returning
    /// [`ParseError::Multiple`] when more than one is found.
    ///
    /// # Errors
    ///
    /// See [`ParseError`].
    #[instrument(skip(self, argv))]
    pub fn parse_accumulating(&self, argv: &[String]) -> Result<Bindings, ParseError> {
        self.parse_accumulating_with_env(argv, &ProcessEnv)
    }

    /// Like [`Self::parse_accumulating`], with an injected [`EnvLookup`].
    ///
    /// # Errors
    ///
    /// See [`ParseError`].
    pub fn parse_accumulating_with_env(
        &self,
        argv: &[String],
        env: &dyn EnvLookup,
    ) -> Result<Bindings, ParseError> {
        let tokens = argfile::expand_all(argv, self.spec.argument_file_prefix())?;
        let mut table = BindingTable::new(self.spec);
        scanner::scan(self.spec, &tokens, &mut table)?;

        if table.eager_exit() {
            table.finalize_sources(self.spec, env)?;
            let positionals = vec![Vec::new(); self.spec.positionals().len()];
            return Ok(Bindings::new(self.spec.clone(), table, positionals));
        }

        let positionals = resolver::resolve(self.spec, &mut table)?;
        table.finalize_sources(self.spec, env)?;

        let errors = constraints_engine::evaluate_collecting(self.spec, &table);
        if let Some(err) = ParseError::multiple(errors) {
            return Err(err);
        }
        Ok(Bindings::new(self.spec.clone(), table, positionals))
    }
}

impl ArgsSpec {
    /// Shorthand for `ArgsParser::new(self).parse(argv)`.
    ///
    /// # Errors
    ///
    /// See [`ParseError`].
    pub fn parse(&self, argv: &[String]) -> Result<Bindings, ParseError> {
        ArgsParser::new(self).parse(argv)
    }

    /// Shorthand for `ArgsParser::new(self).parse_accumulating(argv)`.
    ///
    /// # Errors
    ///
    /// See [`ParseError`].
    pub fn parse_accumulating(&self, argv: &[String]) -> Result<Bindings, ParseError> {
        ArgsParser::new(self).parse_accumulating(argv)
    }
}
