//! Procedural macro implementation for the `argos` crate.
//!
//! This crate provides the `#[derive(ArgsSpec)]` macro that generates the
//! explicit `ownerName` + builder-registration boilerplate the hand-written
//! core API requires (see the core crate's Design Notes on why there is no
//! reflection). It is a proc-macro crate and can only export procedural
//! macros.
//!
//! **Note:** users should depend on the `argos` crate with the `derive`
//! feature enabled, not this one directly; `argos` re-exports the macro
//! alongside the runtime types it generates code against.
//!
//! # Module structure
//!
//! - `parse` — attribute parsing for `#[arg(...)]`, `#[positional(...)]`,
//!   and struct-level `#[domain(...)]`.
//! - `expand` — macro expansion orchestration and code generation.
//!
//! # Generated code
//!
//! The macro generates, on the annotated struct:
//!
//! | Method | Description |
//! |--------|-------------|
//! | `spec()` | Builds the frozen `argos::ArgsSpec` for this struct |
//! | `from_bindings(&Bindings)` | Projects a completed parse back into `Self` |

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;
mod field;
mod parse;

/// Derive macro generating an `argos::ArgsSpec` registration and binding
/// projection for a plain struct.
///
/// # Field attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[arg(long = "name")]` | Long switch `--name` (defaults to the kebab-case field name) |
/// | `#[arg(short = 'n')]` | Short switch `-n` |
/// | `#[arg(env = "VAR")]` | Environment variable fallback |
/// | `#[arg(default = ...)]` | Literal default value |
/// | `#[arg(required)]` | Must end with a `User` value-source |
/// | `#[arg(eager)]` | Short-circuits the remainder of parsing when bound |
/// | `#[arg(hidden)]` | Excluded from help rendering |
/// | `#[arg(negatable)]` | Boolean field gains a `--no-<name>` inverse |
/// | `#[arg(count)]` | `usize` field becomes a `Count`-arity option |
/// | `#[arg(set)]` | `Vec<T>` field de-duplicates, preserving first-seen order |
/// | `#[arg(one_of = ["a", "b"])]` | Restricts raw strings to a fixed set |
/// | `#[arg(only_in_domains = ["build"])]` | Gates the option to listed domains |
/// | `#[positional(one_of = [...])]` | Declares a positional slot instead of a switch |
/// | `#[domain_selector]` | `Option<String>` field that receives the active domain's name |
///
/// # Struct attributes
///
/// `#[domain(name = "build", aliases = ["b"], label = "Build a target")]`,
/// repeatable, registers a sub-command domain before any field builders run
/// so `only_in_domains` can reference it by name.
///
/// # Example
///
/// ```ignore
/// use argos::ArgsSpecDerive;
///
/// #[derive(ArgsSpecDerive)]
/// struct Cli {
///     #[arg(short = 'v', negatable)]
///     verbose: bool,
///     #[arg(long = "name", required)]
///     name: String,
///     #[positional]
///     files: Vec<String>,
/// }
/// ```
#[proc_macro_derive(ArgsSpec, attributes(arg, positional, domain, domain_selector))]
pub fn derive_args_spec(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::expand(&input).unwrap_or_else(|err| err.to_compile_error().into())
}
