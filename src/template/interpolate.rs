use crate::template::scope::RenderScope;
use crate::template::value::to_text;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// `{{ dotted.path }}`, surrounding whitespace allowed.
pub(crate) static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([\w.]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// Replaces every `{{path}}` with the escaped text of its value.
/// Absent and null values render as the empty string.
pub fn interpolate(text: &str, scope: &RenderScope<'_>) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| match scope.lookup(&caps[1]) {
            Some(value) => escape_html(&to_text(value)).into_owned(),
            None => String::new(),
        })
        .into_owned()
}

/// Escapes `& < > " '`. Nothing else is touched.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
