//! The Spec Model: `OptionSpec` / `PositionalSpec` / `DomainSpec` /
//! `ConstraintSpec`, composed by builders into a frozen [`ArgsSpec`].

mod constraint;
mod domain;
mod ids;
mod option;
mod positional;
mod registry;

pub use constraint::{ConstraintKind, ConstraintSpec, ValuePredicate};
pub use domain::{DomainBuilder, DomainSpec};
pub use ids::{DomainId, OptionId, PositionalId};
pub use option::{Arity, OptionBuilder, OptionSpec, RequiresValue};
pub use positional::{PositionalArity, PositionalBuilder, PositionalSpec};
pub use registry::ArgsSpec;
