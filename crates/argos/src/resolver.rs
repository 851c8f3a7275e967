//! The Domain Resolver: turns the Scanner/Binder's raw positional-token
//! list into an active domain selection plus bound positional values. See
//! SPEC_FULL.md §4.5.

use crate::binding::BindingTable;
use crate::error::ParseError;
use crate::spec::{ArgsSpec, PositionalArity};
use crate::value::TypedValue;

/// Consumes `table`'s collected positional tokens: the first is tested
/// against declared domains, then the rest are bound to positional slots in
/// declaration order.
///
/// # Errors
///
/// [`ParseError::MissingPositional`] if a required slot is never filled,
/// [`ParseError::UnexpectedPositional`] if tokens remain once every slot
/// (including a trailing `List`) is full.
pub fn resolve(
    spec: &ArgsSpec,
    table: &mut BindingTable,
) -> Result<Vec<Vec<TypedValue>>, ParseError> {
    let mut tokens: Vec<String> = table.positional_tokens().iter().map(|(t, _)| t.clone()).collect();

    if !spec.domains().is_empty() {
        if let Some(first) = tokens.first() {
            if let Some(domain) = spec.find_domain(first) {
                table.set_active_domain(domain.id());
                tokens.remove(0);
            }
        }
    }

    let mut bound: Vec<Vec<TypedValue>> = vec![Vec::new(); spec.positionals().len()];
    let mut token_iter = tokens.into_iter().peekable();

    for pos in spec.positionals() {
        match pos.arity() {
            PositionalArity::Single => {
                if let Some(raw) = token_iter.next() {
                    let value = pos.converter().convert(&raw).map_err(|e| ParseError::InvalidValue {
                        owner: pos.owner_name().to_string(),
                        raw: e.raw,
                        expected: e.expected.to_string(),
                    })?;
                    bound[pos.id().index()].push(value);
                }
            }
            PositionalArity::List => {
                for raw in token_iter.by_ref() {
                    let value = pos.converter().convert(&raw).map_err(|e| ParseError::InvalidValue {
                        owner: pos.owner_name().to_string(),
                        raw: e.raw,
                        expected: e.expected.to_string(),
                    })?;
                    bound[pos.id().index()].push(value);
                }
            }
        }
    }

    for pos in spec.positionals() {
        if pos.is_required() && bound[pos.id().index()].is_empty() && pos.default_value().is_none() {
            return Err(ParseError::MissingPositional {
                owner: pos.owner_name().to_string(),
            });
        }
        if !bound[pos.id().index()].is_empty() && !pos.allowed_in_domain(table.active_domain()) {
            let domain = table
                .active_domain()
                .map(|d| spec.domain(d).name().to_string())
                .unwrap_or_else(|| "none".to_string());
            return Err(ParseError::OptionNotAllowedInDomain {
                switch: pos.owner_name().to_string(),
                domain,
            });
        }
    }

    if let Some(extra) = token_iter.next() {
        return Err(ParseError::UnexpectedPositional { value: extra });
    }

    Ok(bound)
}
