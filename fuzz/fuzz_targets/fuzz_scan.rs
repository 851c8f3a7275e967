#![no_main]

use argos::{ArgsSpec, DomainBuilder, OptionBuilder, PositionalBuilder, RequiresValue};
use libfuzzer_sys::fuzz_target;

/// A fixed, representative spec exercising every arity, the `Auto`
/// value-requirement heuristic, negation, clustering, domains, and a
/// positional list — so the fuzzer's entropy goes entirely into token
/// shapes rather than spec construction.
fn spec() -> ArgsSpec {
    let mut spec = ArgsSpec::new();
    let build = spec.add_domain(DomainBuilder::new("build").aliases(["b"]));
    spec.add_option(OptionBuilder::new("verbose").switches(["--verbose", "-v"]).bool().negatable().list());
    spec.add_option(OptionBuilder::new("count").switches(["--count", "-c"]).int());
    spec.add_option(
        OptionBuilder::new("flag")
            .switches(["-f"])
            .int()
            .requires_value(RequiresValue::Never),
    );
    spec.add_option(
        OptionBuilder::new("out")
            .switches(["-o", "--out"])
            .string()
            .requires_value(RequiresValue::Always),
    );
    spec.add_option(OptionBuilder::new("target").switches(["--target"]).only_in_domains([build]));
    spec.add_option(OptionBuilder::new("tags").switches(["--tag"]).set());
    spec.add_positional(PositionalBuilder::new("files").list());
    spec
}

fuzz_target!(|argv: Vec<String>| {
    // Scanning and binding an arbitrary token vector against a fixed,
    // representative spec must never panic, regardless of how the tokens
    // happen to interleave switches, clusters, attached values, and
    // positionals.
    let spec = spec();
    match spec.parse(&argv) {
        Ok(bindings) => {
            // Every successful parse must produce a readable snapshot and a
            // value-source for every registered option without panicking.
            for opt in bindings.snapshot().options() {
                let _ = bindings.value_source_of(opt.id());
            }
        }
        Err(err) => {
            let _ = err.to_string();
        }
    }
});
