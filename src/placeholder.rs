//! `{{ name }}` placeholder substitution.
//!
//! A marker is exactly `{{ `, the argument name, then ` }}`. Every occurrence
//! of a supplied argument's marker is replaced in a single left-to-right pass;
//! inserted values are never rescanned. Markers without an argument are kept
//! verbatim and arguments without a marker are ignored.

use regex::Regex;
use std::sync::OnceLock;

const MARKER_OPEN: &str = "{{ ";
const MARKER_CLOSE: &str = " }}";

static MARKER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Build the literal marker for an argument name.
pub fn marker(name: &str) -> String {
    format!("{}{}{}", MARKER_OPEN, name, MARKER_CLOSE)
}

/// Replace every `{{ name }}` marker for which an argument is supplied.
///
/// When the same name is supplied twice, the first value wins.
///
/// # Example
/// ```
/// use i18n_lookup::placeholder::substitute;
///
/// let out = substitute("My name is {{ name }}", [("name", "John")]);
/// assert_eq!(out, "My name is John");
/// ```
pub fn substitute<I, K, V>(template: &str, args: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let markers: Vec<(String, V)> = args
        .into_iter()
        .map(|(name, value)| (marker(name.as_ref()), value))
        .collect();

    if markers.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find(MARKER_OPEN) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match markers.iter().find(|(m, _)| tail.starts_with(m.as_str())) {
            Some((m, value)) => {
                out.push_str(value.as_ref());
                rest = &tail[m.len()..];
            }
            None => {
                out.push_str(MARKER_OPEN);
                rest = &tail[MARKER_OPEN.len()..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Distinct placeholder names in `template`, in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let regex = MARKER_REGEX.get_or_init(|| Regex::new(r"\{\{ (.+?) \}\}").unwrap());

    let mut names: Vec<String> = Vec::new();
    for cap in regex.captures_iter(template) {
        if let Some(name) = cap.get(1) {
            let name = name.as_str().to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}
