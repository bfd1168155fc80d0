//! `$NAME` / `${NAME}` macro expansion and whitespace normalization.

use crate::step::settings::VariableMap;
use regex::Regex;
use std::sync::LazyLock;

/// Matches `$NAME`, `${NAME}` and the `$$` escape.
static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([A-Za-z0-9_]+|\{[A-Za-z0-9_.]+\}|\$)").expect("variable pattern is valid")
});

/// Matches runs of tab, carriage return and newline.
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\t\r\n]+").expect("line break pattern is valid")
});

/// Expand macro tokens in `s` using `vars`.
///
/// Tokens with no value in `vars` are left as written. `$$` is replaced by a
/// single `$`. Substituted values are not scanned again.
pub fn replace_macro(s: &str, vars: &VariableMap) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;

    for token in VARIABLE.find_iter(s) {
        let key = &token.as_str()[1..];
        let value = if key == "$" {
            Some("$")
        } else {
            let key = key
                .strip_prefix('{')
                .and_then(|k| k.strip_suffix('}'))
                .unwrap_or(key);
            vars.get(key).map(String::as_str)
        };

        if let Some(value) = value {
            out.push_str(&s[last..token.start()]);
            out.push_str(value);
            last = token.end();
        }
    }

    out.push_str(&s[last..]);
    out
}

/// Collapse every run of tab/CR/LF characters into a single space.
pub fn normalize(s: &str) -> String {
    LINE_BREAKS.replace_all(s, " ").into_owned()
}

/// Normalize `s`, then expand it against `environment` and `build_variables` in that order.
pub fn expand(s: &str, environment: &VariableMap, build_variables: &VariableMap) -> String {
    let normalized = normalize(s);
    let expanded = replace_macro(&normalized, environment);
    replace_macro(&expanded, build_variables)
}
