use crate::error::{Error, Result};
use crate::loader::TemplateLoader;
use crate::template::comments::CommentTable;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<include\b[^>]*?\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*?(?:/>|>\s*</include\s*>)"#,
    )
    .expect("include pattern is valid")
});

/// Replaces every `<include src="..."/>` marker with the raw content of the
/// referenced file.
///
/// All markers are collected from `text` in one scan before anything is
/// substituted, so markers inside included content are left as they are.
/// Comments inside included content are guarded into `comments`.
pub fn resolve_includes(
    text: &str,
    loader: &dyn TemplateLoader,
    comments: &mut CommentTable,
) -> Result<String> {
    let mut resolved = String::with_capacity(text.len());
    let mut last = 0;
    for caps in INCLUDE.captures_iter(text) {
        let (Some(whole), Some(src)) = (caps.get(0), caps.get(1).or_else(|| caps.get(2))) else {
            continue;
        };
        let name = src.as_str().trim();
        debug!("Including '{name}'.");
        let content = loader.load(name).map_err(|err| match err {
            Error::PathOutsideBaseDir { .. } => err,
            other => Error::IncludeLoad {
                name: name.to_string(),
                source: Box::new(other),
            },
        })?;
        resolved.push_str(&text[last..whole.start()]);
        resolved.push_str(&comments.guard(&content));
        last = whole.end();
    }
    resolved.push_str(&text[last..]);
    Ok(resolved)
}
