//! Argument-file (`@file`) expansion.
//!
//! A token whose first character matches the configured prefix (`@` by
//! default) is replaced in place by the whitespace-split contents of the
//! referenced file. See SPEC_FULL.md §4.1 / §6 for the exact grammar.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ParseError;

/// Splits `contents` into tokens per the argument-file grammar: CRLF is
/// normalized to LF, `#`-prefixed and blank lines are dropped, and the
/// remainder is split on ASCII-whitespace runs.
#[must_use]
pub fn tokenize_file_contents(contents: &str) -> Vec<String> {
    let normalized = contents.replace("\r\n", "\n");
    let mut tokens = Vec::new();
    for line in normalized.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        tokens.extend(line.split_whitespace().map(str::to_string));
    }
    tokens
}

/// Reads and tokenizes the argument file named by `path` (the text
/// following the prefix character, e.g. `config.args` in `@config.args`).
///
/// # Errors
///
/// Returns [`ParseError::ArgumentFile`] if the file cannot be read.
pub fn expand_argument_file(path: &str) -> Result<Vec<String>, ParseError> {
    let file_path: PathBuf = Path::new(path).to_path_buf();
    let contents = fs::read_to_string(&file_path).map_err(|e| ParseError::ArgumentFile {
        path: file_path.clone(),
        message: e.to_string(),
    })?;
    Ok(tokenize_file_contents(&contents))
}

/// Expands every `@file`-prefixed token in `argv` in place, preserving the
/// order of non-file tokens. `prefix` of `None` disables expansion entirely.
///
/// # Errors
///
/// Returns the first [`ParseError::ArgumentFile`] encountered, left to
/// right.
pub fn expand_all(argv: &[String], prefix: Option<char>) -> Result<Vec<String>, ParseError> {
    let Some(prefix) = prefix else {
        return Ok(argv.to_vec());
    };
    let mut out = Vec::with_capacity(argv.len());
    for tok in argv {
        match tok.strip_prefix(prefix) {
            Some(path) if !path.is_empty() => out.extend(expand_argument_file(path)?),
            _ => out.push(tok.clone()),
        }
    }
    Ok(out)
}
