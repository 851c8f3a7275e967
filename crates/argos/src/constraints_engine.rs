//! The Constraint Engine: evaluates the fixed-order pass described in
//! SPEC_FULL.md §4.6 and stops at the first failure.

use tracing::debug;

use crate::binding::BindingTable;
use crate::error::ParseError;
use crate::source::ValueSource;
use crate::spec::{ArgsSpec, ConstraintKind, OptionId, OptionSpec};
use crate::value::TypedValue;

fn label(opt: &OptionSpec) -> String {
    opt.switches().first().cloned().unwrap_or_else(|| opt.owner_name().to_string())
}

fn is_user_present(table: &BindingTable, id: OptionId) -> bool {
    table.option(id).source() == ValueSource::User
}

fn effective_value(table: &BindingTable, id: OptionId) -> TypedValue {
    table.option(id).values().first().cloned().unwrap_or(TypedValue::Null)
}

fn violation(message: impl Into<String>) -> ParseError {
    ParseError::ConstraintViolation { message: message.into() }
}

/// Runs every pass in order, returning the first failure.
///
/// # Errors
///
/// See SPEC_FULL.md §4.6 for which [`ParseError`] variant each pass raises.
pub fn evaluate(spec: &ArgsSpec, table: &BindingTable) -> Result<(), ParseError> {
    check_domain_gating(spec, table)?;
    check_required(spec, table)?;
    check_cardinality(spec, table)?;
    check_conflicts(spec, table)?;
    check_presence_conditional(spec, table)?;
    check_value_conditional(spec, table)?;
    Ok(())
}

fn check_domain_gating(spec: &ArgsSpec, table: &BindingTable) -> Result<(), ParseError> {
    for opt in spec.options() {
        if is_user_present(table, opt.id()) && !opt.allowed_in_domain(table.active_domain()) {
            let domain_name = table
                .active_domain()
                .map(|d| spec.domain(d).name().to_string())
                .unwrap_or_else(|| "none".to_string());
            debug!(option = %label(opt), domain = %domain_name, "domain gating failed");
            return Err(ParseError::OptionNotAllowedInDomain {
                switch: label(opt),
                domain: domain_name,
            });
        }
    }
    Ok(())
}

fn check_required(spec: &ArgsSpec, table: &BindingTable) -> Result<(), ParseError> {
    for opt in spec.options() {
        if opt.is_required() && !is_user_present(table, opt.id()) {
            debug!(option = %label(opt), "required option missing");
            return Err(ParseError::MissingRequired { switch: label(opt) });
        }
    }
    for c in active_constraints(spec, table) {
        if let ConstraintKind::Required(target) = c.kind() {
            if !is_user_present(table, *target) {
                let opt = spec.option(*target);
                debug!(option = %label(opt), "constraint-required option missing");
                return Err(ParseError::MissingRequired { switch: label(opt) });
            }
        }
    }
    Ok(())
}

fn check_cardinality(spec: &ArgsSpec, table: &BindingTable) -> Result<(), ParseError> {
    for c in active_constraints(spec, table) {
        match c.kind() {
            ConstraintKind::AtLeast(target, n) => {
                let count = table.option(*target).user_occurrence_count();
                if count < *n {
                    let opt = spec.option(*target);
                    return Err(violation(format!(
                        "option {} is required at least {} time(s) but was provided {} time(s)",
                        label(opt),
                        n,
                        count
                    )));
                }
            }
            ConstraintKind::AtMost(target, n) => {
                let count = table.option(*target).user_occurrence_count();
                if count > *n {
                    let opt = spec.option(*target);
                    return Err(violation(format!(
                        "option {} is not allowed more than {} time(s)",
                        label(opt),
                        n
                    )));
                }
            }
            ConstraintKind::ExactlyOne(targets) => {
                let present = count_present(table, targets);
                if present != 1 {
                    return Err(violation(format!(
                        "exactly one of {} is required",
                        labels(spec, targets)
                    )));
                }
            }
            ConstraintKind::AtLeastOne(targets) => {
                if count_present(table, targets) < 1 {
                    return Err(violation(format!(
                        "at least one of {} is required",
                        labels(spec, targets)
                    )));
                }
            }
            ConstraintKind::AtMostOne(targets) => {
                if count_present(table, targets) > 1 {
                    return Err(violation(format!(
                        "at most one of {} is not allowed",
                        labels(spec, targets)
                    )));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_conflicts(spec: &ArgsSpec, table: &BindingTable) -> Result<(), ParseError> {
    for c in active_constraints(spec, table) {
        match c.kind() {
            ConstraintKind::Conflicts(a, b) => {
                if is_user_present(table, *a) && is_user_present(table, *b) {
                    return Err(violation(format!(
                        "option {} is not allowed together with {}",
                        label(spec.option(*a)),
                        label(spec.option(*b))
                    )));
                }
            }
            ConstraintKind::ConflictsWith(target, others) => {
                if is_user_present(table, *target) {
                    if let Some(other) = others.iter().find(|o| is_user_present(table, **o)) {
                        return Err(violation(format!(
                            "option {} is not allowed together with {}",
                            label(spec.option(*target)),
                            label(spec.option(*other))
                        )));
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_presence_conditional(spec: &ArgsSpec, table: &BindingTable) -> Result<(), ParseError> {
    for c in active_constraints(spec, table) {
        match c.kind() {
            ConstraintKind::RequireIfAnyPresent(target, refs) => {
                if refs.iter().any(|r| is_user_present(table, *r)) && !is_user_present(table, *target) {
                    return Err(violation(format!(
                        "option {} is required because {} is present",
                        label(spec.option(*target)),
                        labels(spec, refs)
                    )));
                }
            }
            ConstraintKind::RequireIfAllPresent(target, refs) => {
                if !refs.is_empty()
                    && refs.iter().all(|r| is_user_present(table, *r))
                    && !is_user_present(table, *target)
                {
                    return Err(violation(format!(
                        "option {} is required because {} are present",
                        label(spec.option(*target)),
                        labels(spec, refs)
                    )));
                }
            }
            ConstraintKind::RequireIfAnyAbsent(target, refs) => {
                if refs.iter().any(|r| !is_user_present(table, *r)) && !is_user_present(table, *target) {
                    return Err(violation(format!(
                        "option {} is required because {} is absent",
                        label(spec.option(*target)),
                        labels(spec, refs)
                    )));
                }
            }
            ConstraintKind::RequireIfAllAbsent(target, refs) => {
                if !refs.is_empty()
                    && refs.iter().all(|r| !is_user_present(table, *r))
                    && !is_user_present(table, *target)
                {
                    return Err(violation(format!(
                        "option {} is required because {} are absent",
                        label(spec.option(*target)),
                        labels(spec, refs)
                    )));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_value_conditional(spec: &ArgsSpec, table: &BindingTable) -> Result<(), ParseError> {
    for c in active_constraints(spec, table) {
        match c.kind() {
            ConstraintKind::RequireIfValue {
                target,
                reference,
                predicate,
            } => {
                let value = effective_value(table, *reference);
                if predicate(&value) && !is_user_present(table, *target) {
                    return Err(violation(format!(
                        "option {} is required because {} has wrong value",
                        label(spec.option(*target)),
                        label(spec.option(*reference))
                    )));
                }
            }
            ConstraintKind::AllowOnlyIfValue {
                target,
                reference,
                predicate,
            } => {
                let value = effective_value(table, *reference);
                if is_user_present(table, *target) && !predicate(&value) {
                    return Err(violation(format!(
                        "option {} is not allowed because {} has wrong value",
                        label(spec.option(*target)),
                        label(spec.option(*reference))
                    )));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Like [`evaluate`], but never stops early: every pass runs and every
/// failure it finds is collected, for [`crate::ArgsSpec::parse_accumulating`].
#[must_use]
pub fn evaluate_collecting(spec: &ArgsSpec, table: &BindingTable) -> Vec<ParseError> {
    let passes: [fn(&ArgsSpec, &BindingTable) -> Result<(), ParseError>; 6] = [
        check_domain_gating,
        check_required,
        check_cardinality,
        check_conflicts,
        check_presence_conditional,
        check_value_conditional,
    ];
    passes.iter().filter_map(|pass| pass(spec, table).err()).collect()
}

fn active_constraints<'a>(
    spec: &'a ArgsSpec,
    table: &BindingTable,
) -> impl Iterator<Item = &'a crate::spec::ConstraintSpec> {
    let active = table.active_domain();
    spec.constraints().iter().filter(move |c| c.active_in(active))
}

fn count_present(table: &BindingTable, targets: &[OptionId]) -> usize {
    targets.iter().filter(|t| is_user_present(table, **t)).count()
}

fn labels(spec: &ArgsSpec, targets: &[OptionId]) -> String {
    targets
        .iter()
        .map(|t| label(spec.option(*t)))
        .collect::<Vec<_>>()
        .join(", ")
}
