//! Structural validation: tag balance and void-element awareness.

use crate::template::scan::tags;
use std::fmt;

/// Why a document failed structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imbalance {
    /// A closing tag with nothing open.
    UnexpectedClose { tag: String },
    /// A closing tag that does not match the innermost open tag.
    MismatchedClose {
        expected: String,
        found: String,
    },
    /// Tags still open at the end of the document.
    Unclosed { tag: String },
    /// The trimmed text does not start with `<` and end with `>`.
    NotMarkup,
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Imbalance::UnexpectedClose { tag } => write!(f, "unexpected </{tag}>"),
            Imbalance::MismatchedClose { expected, found } => {
                write!(f, "expected </{expected}> but found </{found}>")
            }
            Imbalance::Unclosed { tag } => write!(f, "<{tag}> is never closed"),
            Imbalance::NotMarkup => write!(f, "content does not start and end with a tag"),
        }
    }
}

/// Checks tag balance and reports the first problem found.
pub fn check(text: &str) -> Result<(), Imbalance> {
    let mut stack: Vec<String> = Vec::new();
    for token in tags(text) {
        if token.closing {
            let found = token.name.to_ascii_lowercase();
            match stack.pop() {
                None => return Err(Imbalance::UnexpectedClose { tag: found }),
                Some(expected) if expected != found => {
                    return Err(Imbalance::MismatchedClose { expected, found })
                }
                Some(_) => {}
            }
        } else if token.opens_scope() {
            stack.push(token.name.to_ascii_lowercase());
        }
    }
    if let Some(tag) = stack.pop() {
        return Err(Imbalance::Unclosed { tag });
    }
    let trimmed = text.trim();
    if !(trimmed.starts_with('<') && trimmed.ends_with('>')) {
        return Err(Imbalance::NotMarkup);
    }
    Ok(())
}

/// True when `text` is structurally well-formed.
pub fn validate(text: &str) -> bool {
    check(text).is_ok()
}
