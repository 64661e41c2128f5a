//! Positional message templates.

use regex::{Captures, Regex};
use std::sync::OnceLock;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| Regex::new(r"\$\{([^{}]*)\}").unwrap())
}

/// Expand `${i}` placeholders with `args[i]`.
///
/// `args[0]` is the field's live value, `args[1..]` the validator parameters.
/// Placeholders with a non-numeric key or an out-of-range index are kept
/// verbatim.
pub fn expand(template: &str, args: &[String]) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures<'_>| {
            caps[1]
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
