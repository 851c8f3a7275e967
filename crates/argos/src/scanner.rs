//! The Scanner/Binder: a single left-to-right pass over the expanded token
//! stream that classifies and binds every option occurrence. See
//! SPEC_FULL.md §4.4.

use tracing::trace;

use crate::binding::BindingTable;
use crate::error::ParseError;
use crate::spec::{ArgsSpec, Arity, OptionSpec, RequiresValue};
use crate::value::TypedValue;

/// Runs the scan, mutating `table` in place.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered, in token order.
pub fn scan(spec: &ArgsSpec, tokens: &[String], table: &mut BindingTable) -> Result<(), ParseError> {
    let mut i = 0;
    while i < tokens.len() {
        if table.eager_exit() {
            break;
        }
        let tok = tokens[i].as_str();

        if table.end_of_options_seen() {
            trace!(index = i, token = tok, "positional (end-of-options)");
            table.push_positional(tok.to_string(), i);
            i += 1;
            continue;
        }

        if tok == "--" {
            trace!(index = i, "end-of-options marker");
            table.set_end_of_options();
            i += 1;
            continue;
        }

        if tok == "-" {
            trace!(index = i, token = tok, "positional (bare dash)");
            table.push_positional(tok.to_string(), i);
            i += 1;
            continue;
        }

        if let Some(rest) = tok.strip_prefix("--") {
            i = scan_long(spec, tokens, table, i, rest)?;
            continue;
        }

        if let Some(rest) = tok.strip_prefix('-') {
            i = scan_short(spec, tokens, table, i, rest)?;
            continue;
        }

        trace!(index = i, token = tok, "positional");
        table.push_positional(tok.to_string(), i);
        i += 1;
    }
    Ok(())
}

fn scan_long(
    spec: &ArgsSpec,
    tokens: &[String],
    table: &mut BindingTable,
    i: usize,
    rest: &str,
) -> Result<usize, ParseError> {
    if let Some(eq_idx) = rest.find('=') {
        let switch = format!("--{}", &rest[..eq_idx]);
        let value = rest[eq_idx + 1..].to_string();
        let opt = lookup_switch(spec, &switch)?;
        trace!(index = i, switch = %switch, value = %value, "attached long");
        record(table, opt, Some(value), i, &switch)?;
        return Ok(i + 1);
    }

    let switch = format!("--{rest}");
    let opt = lookup_switch(spec, &switch)?;

    if opt.negated_switch().as_deref() == Some(switch.as_str()) {
        trace!(index = i, switch = %switch, "negated boolean");
        record(table, opt, Some("false".to_string()), i, &switch)?;
        return Ok(i + 1);
    }

    trace!(index = i, switch = %switch, "bare long");
    bind_bare(tokens, table, i, opt, &switch)
}

fn scan_short(
    spec: &ArgsSpec,
    tokens: &[String],
    table: &mut BindingTable,
    i: usize,
    rest: &str,
) -> Result<usize, ParseError> {
    if let Some(eq_idx) = rest.find('=') {
        let ch = rest[..eq_idx].chars().next().unwrap_or_default();
        let switch = format!("-{ch}");
        let value = rest[eq_idx + 1..].to_string();
        let opt = lookup_short(spec, ch, &switch)?;
        trace!(index = i, switch = %switch, value = %value, "attached short");
        record(table, opt, Some(value), i, &switch)?;
        return Ok(i + 1);
    }

    if rest.chars().count() == 1 {
        let ch = rest.chars().next().unwrap_or_default();
        let switch = format!("-{ch}");
        let opt = lookup_short(spec, ch, &switch)?;
        trace!(index = i, switch = %switch, "bare short");
        return bind_bare(tokens, table, i, opt, &switch);
    }

    bind_cluster(spec, tokens, table, i, rest)
}

fn bind_cluster(
    spec: &ArgsSpec,
    tokens: &[String],
    table: &mut BindingTable,
    i: usize,
    rest: &str,
) -> Result<usize, ParseError> {
    let chars: Vec<char> = rest.chars().collect();
    let mut idx = 0;
    while idx < chars.len() {
        let ch = chars[idx];
        let switch = format!("-{ch}");
        let opt = lookup_short(spec, ch, &switch)?;
        let is_last = idx == chars.len() - 1;

        if !opt.is_boolean() && matches!(opt.requires_value(), RequiresValue::Always) {
            if !is_last {
                let value: String = chars[idx + 1..].iter().collect();
                trace!(index = i, switch = %switch, value = %value, "cluster attached value");
                record(table, opt, Some(value), i, &switch)?;
            } else {
                let value = tokens.get(i + 1).cloned().ok_or_else(|| ParseError::MissingValue {
                    owner: opt.owner_name().to_string(),
                })?;
                trace!(index = i, switch = %switch, value = %value, "cluster trailing value");
                record(table, opt, Some(value), i, &switch)?;
                return Ok(i + 2);
            }
            return Ok(i + 1);
        }

        trace!(index = i, switch = %switch, "cluster flag");
        record(table, opt, None, i, &switch)?;
        idx += 1;
    }
    Ok(i + 1)
}

/// Implements the `requiresValueHint` decision, including the `Auto`
/// type-aware heuristic (§4.4).
fn bind_bare(
    tokens: &[String],
    table: &mut BindingTable,
    i: usize,
    opt: &OptionSpec,
    switch: &str,
) -> Result<usize, ParseError> {
    match opt.requires_value() {
        RequiresValue::Always => {
            let value = tokens.get(i + 1).cloned().ok_or_else(|| ParseError::MissingValue {
                owner: opt.owner_name().to_string(),
            })?;
            record(table, opt, Some(value), i, switch)?;
            Ok(i + 2)
        }
        RequiresValue::Never => {
            record(table, opt, None, i, switch)?;
            Ok(i + 1)
        }
        RequiresValue::Auto => {
            let peek = tokens.get(i + 1).map(String::as_str);
            // A leading `-` only rescues the token out of flag mode when
            // this option is numeric and the token actually is a negative
            // number it can parse; other converters never claim a
            // switch-shaped token here (SPEC_FULL §4.4).
            let looks_like_switch =
                |p: &str| p != "-" && p.starts_with('-') && !(opt.converter().is_numeric() && opt.converter().probe(p));

            let flag_mode = match peek {
                None => true,
                Some(p) => looks_like_switch(p),
            };

            if flag_mode {
                // Only a boolean option carries an implicit flag-mode value
                // (`true`); a numeric/string option in flag mode is left
                // absent, with the switch consumed and nothing recorded.
                if opt.is_boolean() {
                    record(table, opt, None, i, switch)?;
                }
                return Ok(i + 1);
            }

            let p = peek.expect("flag_mode is false only when peek is Some");
            if opt.converter().probe(p) || opt.converter().is_string_like() {
                record(table, opt, Some(p.to_string()), i, switch)?;
                Ok(i + 2)
            } else if opt.is_boolean() {
                record(table, opt, None, i, switch)?;
                Ok(i + 1)
            } else {
                // Left absent: the switch is consumed, no occurrence is
                // recorded, and the peeked token remains for the next
                // iteration to classify.
                Ok(i + 1)
            }
        }
    }
}

fn lookup_switch<'a>(spec: &'a ArgsSpec, switch: &str) -> Result<&'a OptionSpec, ParseError> {
    spec.find_by_switch(switch).ok_or_else(|| ParseError::UnknownOption {
        switch: switch.to_string(),
    })
}

fn lookup_short<'a>(spec: &'a ArgsSpec, ch: char, switch: &str) -> Result<&'a OptionSpec, ParseError> {
    spec.find_by_short_char(ch).ok_or_else(|| ParseError::UnknownOption {
        switch: switch.to_string(),
    })
}

fn record(
    table: &mut BindingTable,
    opt: &OptionSpec,
    raw_value: Option<String>,
    origin_index: usize,
    switch: &str,
) -> Result<(), ParseError> {
    let already_present = table.option(opt.id()).is_user_present();
    if matches!(opt.arity(), Arity::Single) && already_present {
        return Err(ParseError::DuplicateOption {
            switch: switch.to_string(),
        });
    }

    let typed = match &raw_value {
        Some(raw) => match opt.converter().convert(raw) {
            Ok(v) => v,
            // An attached value on a boolean option always binds the
            // switch; if the attached text doesn't parse as a boolean
            // literal, fall back to bare-flag semantics (true) rather than
            // failing the parse.
            Err(_) if opt.is_boolean() => TypedValue::Bool(true),
            Err(e) => {
                return Err(ParseError::InvalidValue {
                    owner: opt.owner_name().to_string(),
                    raw: e.raw,
                    expected: e.expected.to_string(),
                });
            }
        },
        // A flag-mode occurrence on a non-boolean option (a `Never`/`Auto`
        // option with no attached or following value) carries no typed
        // value of its own; only booleans use bare presence as their value.
        None if opt.is_boolean() => TypedValue::Bool(true),
        None => TypedValue::Null,
    };

    let binding = table.option_mut(opt.id());
    binding.occurrences.push(crate::binding::Occurrence {
        raw_value,
        origin_index,
    });

    match opt.arity() {
        Arity::Set => {
            if !binding.values.contains(&typed) {
                binding.values.push(typed);
            }
        }
        Arity::Count => {}
        Arity::Single | Arity::List => binding.values.push(typed),
    }

    if opt.is_eager() {
        table.set_eager_exit();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::OptionBuilder;

    fn spec_with_verbose_and_count() -> (ArgsSpec, crate::spec::OptionId, crate::spec::OptionId) {
        let mut spec = ArgsSpec::new();
        let verbose = spec.add_option(OptionBuilder::new("verbose").switches(["--verbose", "-v"]).bool());
        let count = spec.add_option(OptionBuilder::new("count").switches(["--count", "-c"]).int());
        (spec, verbose, count)
    }

    fn toks(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_boolean_flag_sets_true() {
        let (spec, verbose, _count) = spec_with_verbose_and_count();
        let mut table = BindingTable::new(&spec);
        scan(&spec, &toks(&["--verbose"]), &mut table).unwrap();
        assert!(table.option(verbose).is_user_present());
    }

    #[test]
    fn auto_numeric_option_consumes_following_digit_token() {
        let (spec, _verbose, count) = spec_with_verbose_and_count();
        let mut table = BindingTable::new(&spec);
        scan(&spec, &toks(&["--count", "3"]), &mut table).unwrap();
        assert_eq!(table.option(count).values()[0], TypedValue::Int(3));
    }

    #[test]
    fn auto_numeric_option_followed_by_switch_like_token_is_left_absent() {
        let (spec, _verbose, count) = spec_with_verbose_and_count();
        let mut table = BindingTable::new(&spec);
        scan(&spec, &toks(&["--count", "--verbose"]), &mut table).unwrap();
        assert!(!table.option(count).is_user_present());
    }

    #[test]
    fn auto_string_option_does_not_swallow_a_following_switch() {
        let mut spec = ArgsSpec::new();
        let name = spec.add_option(OptionBuilder::new("name").switches(["--name"]).string());
        let verbose = spec.add_option(OptionBuilder::new("verbose").switches(["--verbose"]).bool());
        let mut table = BindingTable::new(&spec);
        scan(&spec, &toks(&["--name", "--verbose"]), &mut table).unwrap();
        assert!(!table.option(name).is_user_present());
        assert!(table.option(verbose).is_user_present());
    }

    #[test]
    fn auto_numeric_option_followed_by_negative_number_consumes_it() {
        let (spec, _verbose, count) = spec_with_verbose_and_count();
        let mut table = BindingTable::new(&spec);
        scan(&spec, &toks(&["--count", "-5"]), &mut table).unwrap();
        assert_eq!(table.option(count).values()[0], TypedValue::Int(-5));
    }

    #[test]
    fn attached_long_form_always_consumes_even_if_invalid() {
        let (spec, _verbose, count) = spec_with_verbose_and_count();
        let mut table = BindingTable::new(&spec);
        let err = scan(&spec, &toks(&["--count=abc"]), &mut table).unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { .. }));
    }

    #[test]
    fn duplicate_single_option_errors() {
        let (spec, _verbose, count) = spec_with_verbose_and_count();
        let mut table = BindingTable::new(&spec);
        let err = scan(&spec, &toks(&["--count", "1", "--count", "2"]), &mut table).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateOption { .. }));
    }

    #[test]
    fn cluster_of_boolean_shorts() {
        let mut spec = ArgsSpec::new();
        let a = spec.add_option(OptionBuilder::new("a").switches(["-a"]).bool());
        let b = spec.add_option(OptionBuilder::new("b").switches(["-b"]).bool());
        let mut table = BindingTable::new(&spec);
        scan(&spec, &toks(&["-ab"]), &mut table).unwrap();
        assert!(table.option(a).is_user_present());
        assert!(table.option(b).is_user_present());
    }

    #[test]
    fn cluster_with_trailing_always_value_attaches_remainder() {
        let mut spec = ArgsSpec::new();
        let verbose = spec.add_option(OptionBuilder::new("verbose").switches(["-v"]).bool());
        let out = spec.add_option(
            OptionBuilder::new("out")
                .switches(["-o"])
                .string()
                .requires_value(RequiresValue::Always),
        );
        let mut table = BindingTable::new(&spec);
        scan(&spec, &toks(&["-vofoo"]), &mut table).unwrap();
        assert!(table.option(verbose).is_user_present());
        assert_eq!(table.option(out).values()[0], TypedValue::Str("foo".to_string()));
    }

    #[test]
    fn end_of_options_marker_stops_option_parsing() {
        let (spec, verbose, _count) = spec_with_verbose_and_count();
        let mut table = BindingTable::new(&spec);
        scan(&spec, &toks(&["--", "--verbose"]), &mut table).unwrap();
        assert!(!table.option(verbose).is_user_present());
        assert_eq!(table.positional_tokens().len(), 1);
    }

    #[test]
    fn unknown_long_option_errors() {
        let (spec, _verbose, _count) = spec_with_verbose_and_count();
        let mut table = BindingTable::new(&spec);
        let err = scan(&spec, &toks(&["--nope"]), &mut table).unwrap_err();
        assert!(matches!(err, ParseError::UnknownOption { .. }));
    }

    #[test]
    fn eager_option_halts_remaining_scan() {
        let mut spec = ArgsSpec::new();
        let help = spec.add_option(OptionBuilder::new("help").switches(["--help"]).bool().eager());
        let other = spec.add_option(OptionBuilder::new("other").switches(["--other"]).bool());
        let mut table = BindingTable::new(&spec);
        scan(&spec, &toks(&["--help", "--other"]), &mut table).unwrap();
        assert!(table.option(help).is_user_present());
        assert!(!table.option(other).is_user_present());
    }
}
