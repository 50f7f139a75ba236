//! Moves HTML comments out of the way while a template is processed.
//!
//! Each `<!-- ... -->` is swapped for an indexed placeholder that the tag
//! scanner, the directive matchers and the interpolator all ignore. The
//! placeholders are swapped back once, after the last validation.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--templ-comment:(\d+)-->").expect("placeholder pattern is valid")
});

/// Ordered table of the comments captured during one render call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommentTable {
    comments: Vec<String>,
}

impl CommentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every comment in `text` with a placeholder, appending the
    /// comments to the table.
    pub fn guard(&mut self, text: &str) -> String {
        COMMENT
            .replace_all(text, |caps: &Captures<'_>| {
                let index = self.comments.len();
                self.comments.push(caps[0].to_string());
                placeholder(index)
            })
            .into_owned()
    }

    /// Puts the captured comments back in place of their placeholders.
    pub fn restore(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.comments.get(index))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }
}

fn placeholder(index: usize) -> String {
    format!("<!--templ-comment:{index}-->")
}

/// Guards `text` with a fresh table.
pub fn extract(text: &str) -> (String, CommentTable) {
    let mut table = CommentTable::new();
    let guarded = table.guard(text);
    (guarded, table)
}

/// Restores the comments of `table` into `text`.
pub fn restore(text: &str, table: &CommentTable) -> String {
    table.restore(text)
}
