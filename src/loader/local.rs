use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::loader::interface::TemplateLoader;
use log::trace;
use std::path::{Path, PathBuf};

/// Loader for templates from a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalLoader<P: AsRef<Path>> {
    base_dir: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    /// Creates a new LocalLoader rooted at `base_dir`.
    pub fn new(base_dir: P) -> Self {
        Self { base_dir }
    }

    /// Resolves `name` against the base directory. Names that are absolute or
    /// climb above the base directory are rejected.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name).confined()?;
        Ok(self.base_dir.as_ref().join(relative))
    }
}

impl<P: AsRef<Path> + Send + Sync> TemplateLoader for LocalLoader<P> {
    /// Reads `name` from the base directory.
    ///
    /// # Errors
    /// * `Error::PathOutsideBaseDir` if `name` escapes the base directory
    /// * `Error::TemplateLoad` if the file is missing or unreadable
    fn load(&self, name: &str) -> Result<String> {
        let path = self.resolve(name)?;
        trace!("Reading '{}'.", path.display());
        std::fs::read_to_string(&path).map_err(|source| Error::TemplateLoad {
            path: path.display().to_string(),
            source,
        })
    }
}
