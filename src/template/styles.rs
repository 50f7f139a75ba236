//! Inlining of stylesheet bodies into rendered documents.

use regex::Regex;
use std::cmp::Reverse;
use std::sync::LazyLock;

static HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head\b[^>]*>").expect("head pattern is valid"));
static BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body\b[^>]*>").expect("body pattern is valid"));
static HTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<html\b[^>]*>").expect("html pattern is valid"));

/// Wraps one stylesheet body in a `<style>` block.
pub fn style_block(css: &str) -> String {
    format!("\n<style>{css}</style>\n")
}

/// Inserts `stylesheets`, in order, into `html`.
///
/// The concatenated blocks go right after the first `<head>` and, separately,
/// right after the first `<body>`. Without a `<head>`, one is synthesized after
/// `<html>`. Without any anchor the blocks are prepended.
pub fn embed_styles<S: AsRef<str>>(html: &str, stylesheets: &[S]) -> String {
    if stylesheets.is_empty() {
        return html.to_string();
    }
    let blocks: String = stylesheets.iter().map(|css| style_block(css.as_ref())).collect();

    let mut insertions: Vec<(usize, String)> = Vec::with_capacity(2);
    match HEAD.find(html) {
        Some(head) => insertions.push((head.end(), blocks.clone())),
        None => {
            if let Some(root) = HTML.find(html) {
                insertions.push((root.end(), format!("\n<head>{blocks}</head>")));
            }
        }
    }
    if let Some(body) = BODY.find(html) {
        insertions.push((body.end(), blocks.clone()));
    }

    if insertions.is_empty() {
        return format!("{}{html}", blocks.trim_start_matches('\n'));
    }

    insertions.sort_by_key(|(at, _)| Reverse(*at));
    let mut embedded = html.to_string();
    for (at, block) in insertions {
        embedded.insert_str(at, &block);
    }
    embedded
}
