use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use indexmap::IndexMap;
use std::io;

/// Loader serving sources from memory, for embedded templates and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: IndexMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `content` under `name`, replacing any previous entry.
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }
}

impl TemplateLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<String> {
        self.files.get(name).cloned().ok_or_else(|| Error::TemplateLoad {
            path: name.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such in-memory template"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn serves_registered_files() {
        let loader = MemoryLoader::new().with_file("a.html", "<a></a>");
        assert_eq!(loader.load("a.html").unwrap(), "<a></a>");
    }

    #[test]
    fn unknown_names_fail_like_missing_files() {
        let err = MemoryLoader::new().load("nope.html").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TemplateLoadFailure);
    }
}
