//! Tag-level scanning shared by validation and directive processing.
//!
//! Markup is never parsed into a tree: these helpers walk tag tokens in
//! document order and locate directive spans by depth counting.

use crate::constants::is_void_element;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)\b[^>]*>").expect("tag pattern is valid")
});

static FOR_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s\*for\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("*for pattern is valid")
});

static IF_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s\*if\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("*if pattern is valid")
});

/// One `<tag ...>` or `</tag>` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagToken<'t> {
    pub start: usize,
    pub end: usize,
    pub name: &'t str,
    pub closing: bool,
    pub self_closing: bool,
}

impl TagToken<'_> {
    /// True for opening tags that expect a matching closing tag.
    pub fn opens_scope(&self) -> bool {
        !self.closing && !self.self_closing && !is_void_element(self.name)
    }

    pub fn same_name(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Iterates over the tag tokens of `text` in document order.
pub fn tags(text: &str) -> impl Iterator<Item = TagToken<'_>> {
    tags_from(text, 0)
}

/// Like [`tags`], starting at byte offset `from`. Offsets stay absolute.
pub fn tags_from(text: &str, from: usize) -> impl Iterator<Item = TagToken<'_>> {
    TAG.captures_iter(&text[from..]).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let name = caps.get(2)?.as_str();
        Some(TagToken {
            start: from + whole.start(),
            end: from + whole.end(),
            name,
            closing: !caps[1].is_empty(),
            self_closing: whole.as_str().ends_with("/>"),
        })
    })
}

/// Byte offset just past the element opened by `open`.
///
/// Void and self-closing tags span themselves. Otherwise the matching closing
/// tag is found by counting nested tags with the same name. Returns `None`
/// when the element is never closed.
pub fn span_end(text: &str, open: &TagToken<'_>) -> Option<usize> {
    if !open.opens_scope() {
        return Some(open.end);
    }
    let mut depth = 1usize;
    for token in tags_from(text, open.end).filter(|t| t.same_name(open.name)) {
        if token.closing {
            depth -= 1;
            if depth == 0 {
                return Some(token.end);
            }
        } else if token.opens_scope() {
            depth += 1;
        }
    }
    None
}

/// Attribute-driven directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    For,
    If,
}

impl DirectiveKind {
    pub fn attribute(&self) -> &'static str {
        match self {
            DirectiveKind::For => crate::constants::directives::FOR,
            DirectiveKind::If => crate::constants::directives::IF,
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            DirectiveKind::For => &FOR_ATTR,
            DirectiveKind::If => &IF_ATTR,
        }
    }
}

/// An opening tag carrying a directive attribute.
#[derive(Debug, Clone)]
pub struct Directive<'t> {
    pub tag: TagToken<'t>,
    /// Attribute value, unquoted and untrimmed.
    pub value: &'t str,
    /// Absolute range of the attribute, including its leading whitespace.
    pub attribute: Range<usize>,
}

impl Directive<'_> {
    /// The opening tag with the directive attribute removed.
    pub fn stripped_opening(&self, text: &str) -> String {
        let mut opening = String::with_capacity(self.tag.end - self.tag.start);
        opening.push_str(&text[self.tag.start..self.attribute.start]);
        opening.push_str(&text[self.attribute.end..self.tag.end]);
        opening
    }
}

/// Finds the leftmost opening tag at or after `from` carrying `kind`.
pub fn find_directive(text: &str, kind: DirectiveKind, from: usize) -> Option<Directive<'_>> {
    tags_from(text, from).filter(|tag| !tag.closing).find_map(|tag| {
        let caps = kind.pattern().captures(&text[tag.range()])?;
        let whole = caps.get(0)?;
        let value = caps.get(1).or_else(|| caps.get(2))?;
        Some(Directive {
            tag,
            value: &text[tag.start + value.start()..tag.start + value.end()],
            attribute: tag.start + whole.start()..tag.start + whole.end(),
        })
    })
}
