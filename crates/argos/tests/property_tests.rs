//! Property-based tests for argos invariants.
//!
//! These tests verify that critical invariants hold for all possible inputs,
//! not just hand-picked test cases.

#![allow(clippy::pedantic)]

use argos::{ArgsSpec, ConstraintKind, ConstraintSpec, MapEnv, OptionBuilder, PositionalBuilder, ValueSource};
use proptest::prelude::*;

// ============================================================================
// Scanner/Binder Properties
// ============================================================================

mod scanner_properties {
    use super::*;

    fn int_spec() -> (ArgsSpec, argos::OptionId) {
        let mut spec = ArgsSpec::new();
        let count = spec.add_option(OptionBuilder::new("count").switches(["--count", "-c"]).int());
        (spec, count)
    }

    proptest! {
        /// `--count N` always parses for any i32, and the bound value
        /// round-trips exactly.
        #[test]
        fn int_roundtrip(n in i32::MIN..=i32::MAX) {
            let (spec, count) = int_spec();
            let argv = vec!["--count".to_string(), n.to_string()];
            let bindings = spec.parse(&argv).unwrap();
            prop_assert_eq!(bindings.get(count).unwrap().as_i64(), Some(i64::from(n)));
        }

        /// A non-numeric attached value never panics; the attached-equals
        /// form always commits to conversion, so it always produces an
        /// `InvalidValue` embedding the raw token verbatim.
        #[test]
        fn garbage_attached_int_never_panics(raw in "[a-zA-Z]{1,12}") {
            let (spec, _count) = int_spec();
            let argv = vec![format!("--count={raw}")];
            match spec.parse(&argv) {
                Err(argos::ParseError::InvalidValue { raw: got, .. }) => prop_assert_eq!(got, raw),
                Ok(_) => prop_assert!(false, "expected InvalidValue, got Ok"),
                Err(other) => prop_assert!(false, "expected InvalidValue, got {other}"),
            }
        }

        /// `-v` repeated N times always yields a `List` of length N.
        #[test]
        fn repeated_short_flag_counts_occurrences(n in 1usize..8) {
            let mut spec = ArgsSpec::new();
            let verbose = spec.add_option(OptionBuilder::new("verbose").switches(["-v"]).bool().list());
            let argv = vec!["-v".to_string(); n];
            let bindings = spec.parse(&argv).unwrap();
            prop_assert_eq!(bindings.list(verbose).len(), n);
        }
    }
}

// ============================================================================
// Binding Table / Value Source Properties
// ============================================================================

mod value_source_properties {
    use super::*;

    proptest! {
        /// Round-trip defaults: a single option with `default(D)` and no
        /// occurrences reports value `D` and source `DEFAULT`.
        #[test]
        fn default_without_occurrence_reports_default_source(d in 0i64..10_000) {
            let mut spec = ArgsSpec::new();
            let port = spec.add_option(
                OptionBuilder::new("port").switches(["--port"]).int().default(d),
            );
            let bindings = spec.parse(&[]).unwrap();
            prop_assert_eq!(bindings.get(port).unwrap().as_i64(), Some(d));
            prop_assert_eq!(bindings.value_source_of(port), ValueSource::Default);
        }

        /// ValueSource monotonicity: a USER occurrence is never demoted,
        /// regardless of whether a default or env binding also exists.
        #[test]
        fn user_occurrence_outranks_default_and_env(d in 0i64..10_000, u in 0i64..10_000) {
            let mut spec = ArgsSpec::new();
            let port = spec.add_option(
                OptionBuilder::new("port")
                    .switches(["--port"])
                    .int()
                    .default(d)
                    .from_env("PORT"),
            );
            let env = MapEnv::from_iter([("PORT".to_string(), "9999".to_string())]);
            let argv = vec!["--port".to_string(), u.to_string()];
            let bindings = argos::ArgsParser::new(&spec).parse_with_env(&argv, &env).unwrap();
            prop_assert_eq!(bindings.value_source_of(port), ValueSource::User);
            prop_assert_eq!(bindings.get(port).unwrap().as_i64(), Some(u));
        }
    }

    #[test]
    fn environment_outranks_default_when_user_absent() {
        let mut spec = ArgsSpec::new();
        let port = spec.add_option(
            OptionBuilder::new("port").switches(["--port"]).int().default(80).from_env("PORT"),
        );
        let env = MapEnv::from_iter([("PORT".to_string(), "443".to_string())]);
        let bindings = argos::ArgsParser::new(&spec).parse_with_env(&[], &env).unwrap();
        assert_eq!(bindings.value_source_of(port), ValueSource::Environment);
        assert_eq!(bindings.get(port).unwrap().as_i64(), Some(443));
    }

    #[test]
    fn empty_env_var_is_treated_as_absent() {
        let mut spec = ArgsSpec::new();
        let port = spec.add_option(OptionBuilder::new("port").switches(["--port"]).int().from_env("PORT"));
        let env = MapEnv::from_iter([("PORT".to_string(), String::new())]);
        let bindings = argos::ArgsParser::new(&spec).parse_with_env(&[], &env).unwrap();
        assert_eq!(bindings.value_source_of(port), ValueSource::Missing);
    }
}

// ============================================================================
// Argument-File Transparency
// ============================================================================

mod argfile_properties {
    use super::*;
    use std::io::Write;

    proptest! {
        /// Argument-file transparency: parsing `[@file, rest...]` equals
        /// parsing the file's tokens spliced in place, modulo value-source
        /// (both still report USER).
        #[test]
        fn file_splice_matches_inline_tokens(n in 0i64..1000) {
            let mut spec = ArgsSpec::new();
            let count = spec.add_option(OptionBuilder::new("count").switches(["--count"]).int());

            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "--count {n}").unwrap();
            let path = file.path().to_str().unwrap().to_string();

            let via_file = spec.parse(&[format!("@{path}")]).unwrap();
            let inline = spec.parse(&["--count".to_string(), n.to_string()]).unwrap();

            prop_assert_eq!(via_file.get(count), inline.get(count));
            prop_assert_eq!(via_file.value_source_of(count), ValueSource::User);
            prop_assert_eq!(inline.value_source_of(count), ValueSource::User);
        }
    }
}

// ============================================================================
// Conversion-precedes-constraints
// ============================================================================

mod conversion_precedes_constraints {
    use super::*;

    proptest! {
        /// If any argv token fails conversion, the message contains the raw
        /// token string and does NOT mention constraint keywords. The
        /// attached-equals form always commits to conversion, so this never
        /// depends on the Auto value-requirement heuristic's lookahead.
        #[test]
        fn invalid_value_error_never_mentions_constraint_keywords(raw in "[a-zA-Z]{1,10}") {
            let mut spec = ArgsSpec::new();
            let count = spec.add_option(OptionBuilder::new("count").switches(["--count"]).int().required());
            spec.add_constraint(ConstraintSpec::new(ConstraintKind::Required(count)));

            let argv = vec![format!("--count={raw}")];
            let err = spec.parse(&argv).unwrap_err();
            let msg = err.to_string();
            prop_assert!(msg.contains(&raw));
            prop_assert!(!msg.contains("is not allowed"));
            prop_assert!(!msg.contains("is required"));
        }
    }
}

// ============================================================================
// Order-insensitivity for independent options
// ============================================================================

mod order_insensitivity {
    use super::*;

    fn two_option_spec() -> (ArgsSpec, argos::OptionId, argos::OptionId) {
        let mut spec = ArgsSpec::new();
        let name = spec.add_option(OptionBuilder::new("name").switches(["--name"]).string());
        let level = spec.add_option(OptionBuilder::new("level").switches(["--level"]).int());
        (spec, name, level)
    }

    proptest! {
        #[test]
        fn swapping_independent_options_yields_same_binding(level in 0i64..100) {
            let (spec, name, level_id) = two_option_spec();
            let a = spec.parse(&[
                "--name".to_string(), "gopher".to_string(),
                "--level".to_string(), level.to_string(),
            ]).unwrap();
            let b = spec.parse(&[
                "--level".to_string(), level.to_string(),
                "--name".to_string(), "gopher".to_string(),
            ]).unwrap();
            prop_assert_eq!(a.get(name), b.get(name));
            prop_assert_eq!(a.get(level_id), b.get(level_id));
        }
    }
}

// ============================================================================
// Scenario catalog (SPEC_FULL.md §8, literal inputs)
// ============================================================================

mod scenario_catalog {
    use super::*;
    use std::io::Write;

    fn mode_backup_spec() -> (ArgsSpec, argos::OptionId, argos::OptionId) {
        let mut spec = ArgsSpec::new();
        let mode = spec.add_option(OptionBuilder::new("mode").switches(["--mode"]).one_of(["development", "production"]));
        let backup = spec.add_option(OptionBuilder::new("backup").switches(["--backup"]));
        spec.add_constraint(ConstraintSpec::new(ConstraintKind::AllowOnlyIfValue {
            target: backup,
            reference: mode,
            predicate: std::sync::Arc::new(|v| v.as_str() == Some("production")),
        }));
        (spec, mode, backup)
    }

    #[test]
    fn scenario_1_allow_only_if_value_passes() {
        let (spec, mode, backup) = mode_backup_spec();
        let bindings = spec.parse(&[
            "--mode".to_string(), "production".to_string(),
            "--backup".to_string(), "daily".to_string(),
        ]).unwrap();
        assert_eq!(bindings.get(mode).unwrap().as_str(), Some("production"));
        assert_eq!(bindings.get(backup).unwrap().as_str(), Some("daily"));
    }

    #[test]
    fn scenario_2_allow_only_if_value_fails() {
        let (spec, ..) = mode_backup_spec();
        let err = spec.parse(&[
            "--mode".to_string(), "development".to_string(),
            "--backup".to_string(), "daily".to_string(),
        ]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("--backup is not allowed"));
        assert!(msg.contains("--mode has wrong value"));
    }

    #[test]
    fn scenario_3_argument_file_splices_flags_and_defaults() {
        let mut spec = ArgsSpec::new();
        let input = spec.add_option(OptionBuilder::new("input").switches(["--input"]));
        let output = spec.add_option(OptionBuilder::new("output").switches(["--output"]));
        let verbose = spec.add_option(OptionBuilder::new("verbose").switches(["--verbose"]).bool());
        let count = spec.add_option(OptionBuilder::new("count").switches(["--count"]).int().default(1));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "--input data.txt --output result.txt --verbose").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let bindings = spec.parse(&[format!("@{path}")]).unwrap();
        assert_eq!(bindings.get(input).unwrap().as_str(), Some("data.txt"));
        assert_eq!(bindings.get(output).unwrap().as_str(), Some("result.txt"));
        assert!(bindings.get(verbose).unwrap().as_bool().unwrap());
        assert_eq!(bindings.get(count).unwrap().as_i64(), Some(1));
        assert_eq!(bindings.value_source_of(count), ValueSource::Default);
    }

    #[test]
    fn scenario_4_duplicate_across_argv_and_file() {
        let mut spec = ArgsSpec::new();
        spec.add_option(OptionBuilder::new("count").switches(["--count"]).int());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "--count 50").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let err = spec.parse(&["--count".to_string(), "25".to_string(), format!("@{path}")]).unwrap_err();
        assert!(err.to_string().contains("provided multiple times"));
    }

    #[test]
    fn scenario_5_eager_exit_leaves_required_field_uninitialized() {
        let mut spec = ArgsSpec::new();
        let help = spec.add_option(OptionBuilder::new("help").switches(["--help"]).bool().eager());
        let required_string = spec.add_option(OptionBuilder::new("requiredString").switches(["--required"]).required());

        let bindings = spec.parse(&["--help".to_string()]).unwrap();
        assert!(bindings.get(help).unwrap().as_bool().unwrap());
        let err = bindings.require(required_string).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("requiredString"));
        assert!(msg.contains("not initialized"));
    }

    #[test]
    fn scenario_6_short_flag_cluster_list_arity() {
        let mut spec = ArgsSpec::new();
        let verbose = spec.add_option(OptionBuilder::new("verbose").switches(["-v"]).bool().list());
        let bindings = spec.parse(&["-vvv".to_string()]).unwrap();
        assert_eq!(bindings.list(verbose).len(), 3);
    }

    #[test]
    fn scenario_7_cluster_with_trailing_flag_only_option() {
        let mut spec = ArgsSpec::new();
        let count = spec.add_option(
            OptionBuilder::new("count").switches(["-c"]).int().requires_value(argos::RequiresValue::Never),
        );
        let verbose = spec.add_option(OptionBuilder::new("verbose").switches(["-v"]).bool());
        spec.add_positional(PositionalBuilder::new("file"));

        let bindings = spec.parse(&["-cv".to_string(), "file.txt".to_string()]).unwrap();
        assert!(bindings.get(count).unwrap().is_null());
        assert!(bindings.get(verbose).unwrap().as_bool().unwrap());
        assert_eq!(
            bindings.positional(spec.positionals()[0].id()).unwrap().as_str(),
            Some("file.txt")
        );
    }

    #[test]
    fn scenario_8_attached_value_always_consumed_even_if_conversion_fails() {
        let mut spec = ArgsSpec::new();
        let debug = spec.add_option(
            OptionBuilder::new("debug").switches(["--debug"]).bool().requires_value(argos::RequiresValue::Never),
        );
        spec.add_positional(PositionalBuilder::new("file"));

        let bindings = spec.parse(&["--debug=invalid".to_string()]).unwrap();
        assert_eq!(bindings.get(debug).unwrap().as_bool(), Some(true));
    }

    #[test]
    fn scenario_9_auto_heuristic_rejects_non_numeric_next_token() {
        let mut spec = ArgsSpec::new();
        let count = spec.add_option(
            OptionBuilder::new("count").switches(["--count"]).int().requires_value(argos::RequiresValue::Never),
        );
        spec.add_positional(PositionalBuilder::new("head"));
        spec.add_positional(PositionalBuilder::new("tail"));

        let bindings = spec.parse(&["--count".to_string(), "1.5".to_string(), "file.txt".to_string()]).unwrap();
        assert!(bindings.get(count).unwrap().is_null());
        assert_eq!(
            bindings.positional(spec.positionals()[0].id()).unwrap().as_str(),
            Some("1.5")
        );
        assert_eq!(
            bindings.positional(spec.positionals()[1].id()).unwrap().as_str(),
            Some("file.txt")
        );
    }

    #[test]
    fn scenario_10_domain_scoped_require_if_all_absent() {
        let mut spec = ArgsSpec::new();
        let build = spec.add_domain(argos::DomainBuilder::new("build"));
        let target = spec.add_option(OptionBuilder::new("target").switches(["--target"]).only_in_domains([build]));
        let source = spec.add_option(OptionBuilder::new("source").switches(["--source"]).only_in_domains([build]));
        let output = spec.add_option(OptionBuilder::new("output").switches(["--output"]).only_in_domains([build]));
        spec.add_constraint(
            ConstraintSpec::new(ConstraintKind::RequireIfAllAbsent(target, vec![source, output])).scoped_to(build),
        );

        let err = spec.parse(&["build".to_string()]).unwrap_err();
        assert!(err.to_string().contains("--target"));
    }
}

// ============================================================================
// Conditional Constraint Properties
// ============================================================================

mod constraint_properties {
    use super::*;

    proptest! {
        /// A `Conflicts` pair never both report `User` source at once; the
        /// engine always rejects the second.
        #[test]
        fn conflicting_options_together_always_fail(a_first in any::<bool>()) {
            let mut spec = ArgsSpec::new();
            let quiet = spec.add_option(OptionBuilder::new("quiet").switches(["--quiet"]).bool());
            let verbose = spec.add_option(OptionBuilder::new("verbose").switches(["--verbose"]).bool());
            spec.add_constraint(ConstraintSpec::new(ConstraintKind::Conflicts(quiet, verbose)));

            let argv = if a_first {
                vec!["--quiet".to_string(), "--verbose".to_string()]
            } else {
                vec!["--verbose".to_string(), "--quiet".to_string()]
            };
            let err = spec.parse(&argv).unwrap_err();
            prop_assert!(err.to_string().contains("is not allowed together with"));
        }
    }
}
