//! Expansion of `*for="item of path"` directives.
//!
//! Each iteration's value is bound under a synthetic name in the call's
//! [`RenderScope`] and the fragment is copied with every reference to the item
//! rewritten to that name. Inner loops become top-level loops of the next
//! pass, so nesting needs no special casing beyond shadowing.

use crate::constants::directives::FOR_KEYWORD;
use crate::error::{Error, Result};
use crate::template::scan::{find_directive, span_end, DirectiveKind};
use crate::template::scope::RenderScope;
use crate::template::value::kind_of;
use log::{debug, trace};
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

use super::interpolate::PLACEHOLDER;

static IF_GUARD_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\*if\s*=\s*["']\s*!?\s*)([\w.]+)"#).expect("*if reference pattern is valid")
});

static FOR_SOURCE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\*for\s*=\s*["']\s*\w+\s+of\s+)([\w.]+)"#)
        .expect("*for reference pattern is valid")
});

/// A parsed `item of source.path` loop expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopExpr {
    pub item: String,
    pub source: String,
}

impl LoopExpr {
    pub fn parse(expression: &str) -> Result<Self> {
        let invalid = || Error::InvalidLoopExpression { expression: expression.to_string() };
        let mut words = expression.split_whitespace();
        match (words.next(), words.next(), words.next(), words.next()) {
            (Some(item), Some(FOR_KEYWORD), Some(source), None)
                if is_identifier(item) && is_path(source) =>
            {
                Ok(Self {
                    item: item.to_string(),
                    source: source.to_string(),
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl std::fmt::Display for LoopExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {FOR_KEYWORD} {}", self.item, self.source)
    }
}

fn is_identifier(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn is_path(word: &str) -> bool {
    word.split('.').all(is_identifier)
}

/// Expands every loop in `text` against a fresh scope over `data`.
///
/// Returns the expanded text together with the expanded context that the
/// rest of the pipeline resolves against. Synthetic names already written in
/// `text` are never bound, so only rewritten references reach a binding.
pub fn expand_loops<'a>(text: &str, data: &'a Value) -> Result<(String, RenderScope<'a>)> {
    let mut scope = RenderScope::new(data);
    scope.reserve_names_in(text);
    let expanded = expand_loops_in(text, &mut scope)?;
    Ok((expanded, scope))
}

/// Expands every loop in `text`, adding iteration bindings to `scope`.
pub fn expand_loops_in(text: &str, scope: &mut RenderScope<'_>) -> Result<String> {
    let mut text = text.to_string();
    while let Some(directive) = find_directive(&text, DirectiveKind::For, 0) {
        let expr = LoopExpr::parse(directive.value)?;
        let start = directive.tag.start;
        let end = span_end(&text, &directive.tag).ok_or_else(|| Error::UnterminatedDirective {
            directive: DirectiveKind::For.attribute(),
            expression: expr.to_string(),
            tag: directive.tag.name.to_string(),
        })?;

        let items = match scope.lookup(&expr.source) {
            Some(Value::Array(items)) => items.clone(),
            other => {
                return Err(Error::LoopSourceType {
                    item: expr.item,
                    source_path: expr.source,
                    kind: kind_of(other),
                })
            }
        };
        debug!("Expanding *for=\"{expr}\" over {} item(s).", items.len());

        let mut fragment = directive.stripped_opening(&text);
        fragment.push_str(&text[directive.tag.end..end]);

        let mut expanded = String::with_capacity(fragment.len() * items.len());
        for item in items {
            let name = scope.bind(item);
            trace!("Bound '{}' to '{name}'.", expr.item);
            expanded.push_str(&rewrite_item_refs(&fragment, &expr.item, &name)?);
        }
        text.replace_range(start..end, &expanded);
    }
    Ok(text)
}

/// Rewrites references to `item` inside `fragment` so they point at `binding`.
///
/// Covers `{{item...}}` placeholders, `*if` guards and nested `*for` sources.
/// A nested loop that declares its own `item` shadows the outer one: only its
/// source path is rewritten and its body is copied untouched.
pub fn rewrite_item_refs(fragment: &str, item: &str, binding: &str) -> Result<String> {
    let mut rewritten = String::with_capacity(fragment.len());
    let mut cursor = 0;
    let mut from = 0;
    while let Some(nested) = find_directive(fragment, DirectiveKind::For, from) {
        from = nested.tag.end;
        let shadows = LoopExpr::parse(nested.value).is_ok_and(|expr| expr.item == item);
        if !shadows {
            continue;
        }
        let end = span_end(fragment, &nested.tag).ok_or_else(|| Error::UnterminatedDirective {
            directive: DirectiveKind::For.attribute(),
            expression: nested.value.trim().to_string(),
            tag: nested.tag.name.to_string(),
        })?;
        rewritten.push_str(&rewrite_refs(&fragment[cursor..nested.tag.start], item, binding));
        rewritten.push_str(&rewrite_loop_sources(&fragment[nested.tag.range()], item, binding));
        rewritten.push_str(&fragment[nested.tag.end..end]);
        cursor = end;
        from = end;
    }
    rewritten.push_str(&rewrite_refs(&fragment[cursor..], item, binding));
    Ok(rewritten)
}

fn rewrite_refs(text: &str, item: &str, binding: &str) -> String {
    let text = PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        match rebase(&caps[1], item, binding) {
            Some(path) => format!("{{{{{path}}}}}"),
            None => caps[0].to_string(),
        }
    });
    let text = IF_GUARD_REF.replace_all(&text, |caps: &Captures<'_>| {
        rebase_capture(caps, item, binding)
    });
    rewrite_loop_sources(&text, item, binding)
}

fn rewrite_loop_sources(text: &str, item: &str, binding: &str) -> String {
    FOR_SOURCE_REF
        .replace_all(text, |caps: &Captures<'_>| rebase_capture(caps, item, binding))
        .into_owned()
}

fn rebase_capture(caps: &Captures<'_>, item: &str, binding: &str) -> String {
    match rebase(&caps[2], item, binding) {
        Some(path) => format!("{}{path}", &caps[1]),
        None => caps[0].to_string(),
    }
}

/// `item` -> `binding`, `item.rest` -> `binding.rest`, anything else -> `None`.
fn rebase(path: &str, item: &str, binding: &str) -> Option<String> {
    let rest = path.strip_prefix(item)?;
    if rest.is_empty() || rest.starts_with('.') {
        Some(format!("{binding}{rest}"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SYNTHETIC_BINDING_PREFIX;
    use crate::error::ErrorKind;
    use crate::template::interpolate::interpolate;
    use serde_json::json;

    fn expand(text: &str, data: &Value) -> Result<String> {
        let (expanded, scope) = expand_loops(text, data)?;
        Ok(interpolate(&expanded, &scope))
    }

    #[test]
    fn parses_loop_expressions() {
        let expr = LoopExpr::parse("  role of project.roles ").unwrap();
        let expected = LoopExpr {
            item: "role".into(),
            source: "project.roles".into(),
        };
        assert_eq!(expr, expected);
        assert_eq!(expr.to_string(), "role of project.roles");
        for bad in ["items", "item in items", "item of", "item of a b", "it-em of items"] {
            let err = LoopExpr::parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidLoopExpression, "{bad}");
        }
    }

    #[test]
    fn expands_in_source_order() {
        let data = json!({"items": [{"name": "Item 1"}, {"name": "Item 2"}, {"name": "Item 3"}]});
        let out = expand(r#"<ul><li *for="item of items">{{item.name}}</li></ul>"#, &data).unwrap();
        assert_eq!(out, "<ul><li>Item 1</li><li>Item 2</li><li>Item 3</li></ul>");
    }

    #[test]
    fn empty_sequence_removes_the_fragment() {
        let out = expand("<ul><li *for='x of xs'>{{x}}</li></ul>", &json!({"xs": []})).unwrap();
        assert_eq!(out, "<ul></ul>");
    }

    #[test]
    fn rewrites_attributes_and_guards_on_the_loop_tag() {
        let data = json!({"items": ["Item 1", "Item 2"]});
        let template = "<div *for='item of items' *if='item' id='{{item}}'></div>";
        let (out, scope) = expand_loops(template, &data).unwrap();
        let names: Vec<_> = scope.bindings().keys().cloned().collect();
        assert_eq!(
            out,
            format!(
                "<div *if='{a}' id='{{{{{a}}}}}'></div><div *if='{b}' id='{{{{{b}}}}}'></div>",
                a = names[0],
                b = names[1]
            )
        );
    }

    #[test]
    fn leaves_similar_names_alone() {
        let data = json!({"items": ["a"], "itemCount": 3, "items2": "x"});
        let template = "<p *for='item of items'>{{item}} {{itemCount}} {{ items2 }}</p>";
        let out = expand(template, &data).unwrap();
        assert_eq!(out, "<p>a 3 x</p>");
    }

    #[test]
    fn nested_loops_over_outer_item() {
        let data = json!({"projects": [
            {"name": "P1", "roles": ["R1", "R2"]},
            {"name": "P2", "roles": ["R3"]},
        ]});
        let template = "<ul><li *for='project of projects'><b>{{project.name}}</b>\
                        <i *for='role of project.roles'>{{project.name}}:{{role}}</i></li></ul>";
        let out = expand(template, &data).unwrap();
        assert_eq!(
            out,
            "<ul><li><b>P1</b><i>P1:R1</i><i>P1:R2</i></li><li><b>P2</b><i>P2:R3</i></li></ul>"
        );
    }

    #[test]
    fn inner_loop_shadows_outer_item_name() {
        let data = json!({"groups": [["G1", "G2"], ["G3"]]});
        let template = "<div *for='item of groups'><span *for='item of item'>{{item}}</span></div>";
        let out = expand(template, &data).unwrap();
        assert_eq!(out, "<div><span>G1</span><span>G2</span></div><div><span>G3</span></div>");
    }

    #[test]
    fn nested_same_tag_name_is_matched_by_depth() {
        let data = json!({"items": ["A", "B"]});
        let template = "<div *for='item of items' class='red'><div>{{item}}</div></div>";
        let out = expand(template, &data).unwrap();
        assert_eq!(out, "<div class='red'><div>A</div></div><div class='red'><div>B</div></div>");
    }

    #[test]
    fn loop_on_void_element_repeats_the_tag() {
        let data = json!({"srcs": ["a.png", "b.png"]});
        let out = expand("<p><img *for='src of srcs' src='{{src}}'></p>", &data).unwrap();
        assert_eq!(out, "<p><img src='a.png'><img src='b.png'></p>");
    }

    #[test]
    fn non_sequence_source_is_a_type_error() {
        let err = expand("<p *for='item of items'>{{item}}</p>", &json!({"items": "not an array"}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LoopSourceTypeError);
        assert_eq!(err.to_string(), "Expected array for *for=\"item of items\", got string");

        let err = expand("<p *for='item of missing'></p>", &json!({})).unwrap_err();
        assert!(err.to_string().ends_with("got undefined"));
        let err = expand("<p *for='item of obj'></p>", &json!({"obj": {}})).unwrap_err();
        assert!(err.to_string().ends_with("got object"));
    }

    #[test]
    fn unclosed_loop_is_unterminated() {
        let err =
            expand("<ul><li *for='item of items'>x</ul>", &json!({"items": [1]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedDirective);
        assert!(err.to_string().contains("item of items"));
    }

    #[test]
    fn does_not_mutate_caller_data() {
        let data = json!({"items": [1, 2]});
        let before = data.clone();
        let (_, scope) = expand_loops("<p *for='i of items'>{{i}}</p>", &data).unwrap();
        assert_eq!(scope.bindings().len(), 2);
        assert_eq!(data, before);
    }

    #[test]
    fn bindings_are_unreachable_by_name_from_template_text() {
        let template = format!(
            "<div><p *for='x of xs'>{{{{x}}}}</p><i>{{{{{SYNTHETIC_BINDING_PREFIX}0}}}}</i></div>"
        );
        let out = expand(&template, &json!({"xs": ["secret"]})).unwrap();
        assert_eq!(out, "<div><p>secret</p><i></i></div>");
    }

    #[test]
    fn rebase_only_matches_whole_segments() {
        assert_eq!(rebase("item", "item", "b"), Some("b".into()));
        assert_eq!(rebase("item.name", "item", "b"), Some("b.name".into()));
        assert_eq!(rebase("items", "item", "b"), None);
        assert_eq!(rebase("other", "item", "b"), None);
    }
}
