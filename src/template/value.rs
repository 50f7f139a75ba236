//! Dotted-path lookups and the truthiness/stringification rules applied to
//! context values.

use serde_json::Value;
use std::borrow::Cow;

/// Splits `path` into its first segment and the (possibly empty) remainder.
pub fn split_head(path: &str) -> (&str, &str) {
    match path.split_once('.') {
        Some((head, rest)) => (head, rest),
        None => (path, ""),
    }
}

/// Resolves a dotted path against `root`.
///
/// Object keys are looked up by name and numeric segments index sequences.
/// Returns `None` as soon as a segment is missing or an intermediate value is
/// null; an empty path yields `root` itself.
pub fn resolve<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    })
}

/// Truthiness of a resolved value.
///
/// Absent, null, `false`, `""` and numeric zero are falsy. Sequences and
/// mappings are truthy even when empty.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Name of the value's kind, as reported in loop type errors.
pub fn kind_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Unescaped text form of a value. Null renders as nothing, composite values
/// as compact JSON.
pub fn to_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}
