#![no_main]

use argos::argfile::tokenize_file_contents;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|contents: String| {
    // Tokenizing arbitrary file contents must never panic, and every
    // produced token must be non-empty (blank runs of whitespace never
    // survive `split_whitespace`).
    let tokens = tokenize_file_contents(&contents);
    for tok in &tokens {
        assert!(!tok.is_empty());
    }

    // No emitted token can originate from a comment or blank line: re-running
    // the tokenizer on the joined output must be a fixed point (idempotent).
    let joined = tokens.join("\n");
    let retokenized = tokenize_file_contents(&joined);
    assert_eq!(tokens, retokenized);
});
