//! Declarative command-line argument parsing with cross-option constraints.
//!
//! `argos` takes a raw token vector (typically [`std::env::args`], skipping
//! `argv[0]`) plus a frozen [`ArgsSpec`] describing the options, positionals,
//! sub-command domains, and cross-option constraints a program accepts, and
//! produces a [`Bindings`] — a fully validated, type-erased view of every
//! value the invocation supplied, defaulted, or picked up from the
//! environment.
//!
//! ```
//! use argos::{ArgsSpec, OptionBuilder};
//!
//! let mut spec = ArgsSpec::new();
//! let verbose = spec.add_option(OptionBuilder::new("verbose").switches(["--verbose", "-v"]).bool());
//! let name = spec.add_option(OptionBuilder::new("name").switches(["--name", "-n"]).string().required());
//!
//! let argv: Vec<String> = vec!["--name".into(), "gopher".into(), "-v".into()];
//! let bindings = spec.parse(&argv).unwrap();
//!
//! assert_eq!(bindings.get(name).unwrap().as_str(), Some("gopher"));
//! assert!(bindings.get(verbose).unwrap().as_bool().unwrap());
//! ```
//!
//! The crate is organized around the data flow described in its design
//! notes: a [`Token Source`](argfile) expands `@file` tokens, the
//! [`scanner`] classifies and binds every option occurrence, the
//! [`resolver`] finalizes sub-command selection and positional values, the
//! [`constraints_engine`] validates cross-option rules, and [`surface`]
//! exposes the result.
//!
//! Enable the `derive` feature for `#[derive(ArgsSpec)]`, an optional
//! code-generation layer over this same builder API.

pub mod argfile;
pub mod binding;
pub mod constraints_engine;
pub mod convert;
pub mod env;
pub mod error;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod source;
pub mod spec;
pub mod surface;
pub mod value;

pub use convert::{Converter, ConvertError};
pub use env::{EnvLookup, MapEnv, ProcessEnv};
pub use error::{ErrorKind, ParseError, ParseResult};
pub use parser::ArgsParser;
pub use source::ValueSource;
pub use spec::{
    Arity, ArgsSpec, ConstraintKind, ConstraintSpec, DomainBuilder, DomainId, DomainSpec,
    OptionBuilder, OptionId, OptionSpec, PositionalArity, PositionalBuilder, PositionalId,
    PositionalSpec, RequiresValue, ValuePredicate,
};
pub use surface::Bindings;
pub use value::TypedValue;

#[cfg(feature = "derive")]
pub use argos_macro::ArgsSpec as ArgsSpecDerive;
