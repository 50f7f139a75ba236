use crate::constants::directives::NEGATION;
use crate::error::{Error, Result};
use crate::template::scan::{find_directive, span_end, DirectiveKind};
use crate::template::scope::RenderScope;
use crate::template::value::is_truthy;
use log::trace;

/// A parsed `*if` guard: a dotted path with an optional leading `!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard<'e> {
    pub path: &'e str,
    pub negated: bool,
}

impl<'e> Guard<'e> {
    pub fn parse(expression: &'e str) -> Self {
        let expression = expression.trim();
        match expression.strip_prefix(NEGATION) {
            Some(path) => Self {
                path: path.trim(),
                negated: true,
            },
            None => Self {
                path: expression,
                negated: false,
            },
        }
    }

    pub fn holds(&self, scope: &RenderScope<'_>) -> bool {
        is_truthy(scope.lookup(self.path)) != self.negated
    }
}

/// Keeps or drops every `*if`-guarded fragment of `text`.
///
/// A fragment whose guard holds keeps its content and loses the attribute; any
/// other fragment is removed along with its tags.
pub fn apply_conditionals(text: &str, scope: &RenderScope<'_>) -> Result<String> {
    let mut text = text.to_string();
    while let Some(directive) = find_directive(&text, DirectiveKind::If, 0) {
        let guard = Guard::parse(directive.value);
        let end = span_end(&text, &directive.tag).ok_or_else(|| Error::UnterminatedDirective {
            directive: DirectiveKind::If.attribute(),
            expression: directive.value.trim().to_string(),
            tag: directive.tag.name.to_string(),
        })?;
        let keep = guard.holds(scope);
        trace!("*if=\"{}\" {}", directive.value.trim(), if keep { "kept" } else { "dropped" });

        let (replace, with) = if keep {
            (directive.tag.range(), directive.stripped_opening(&text))
        } else {
            (directive.tag.start..end, String::new())
        };
        text.replace_range(replace, &with);
    }
    Ok(text)
}
