use crate::error::Result;

/// Trait for loading template, include and stylesheet sources.
///
/// Implementations must be shareable between threads: one loader serves every
/// render call made through an engine, and calls may run concurrently.
pub trait TemplateLoader: Send + Sync {
    /// Loads the raw text stored under `name`.
    ///
    /// # Arguments
    /// * `name` - Name of the file, relative to the loader's base
    ///
    /// # Returns
    /// * `Result<String>` - The file contents
    fn load(&self, name: &str) -> Result<String>;
}
