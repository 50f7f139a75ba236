use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Extension trait for Path to keep template lookups inside their base directory
pub trait PathExt {
    /// Lexically normalizes a relative template name, resolving `.` and `..`
    /// without touching the file system.
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - The normalized relative path
    /// * `Err(Error::PathOutsideBaseDir)` - If the path is absolute or climbs
    ///   above its starting directory
    ///
    /// # Examples
    /// ```
    /// use templ::ext::PathExt;
    /// use std::path::{Path, PathBuf};
    ///
    /// let path = Path::new("partials/../footer.html");
    /// assert_eq!(path.confined().unwrap(), PathBuf::from("footer.html"));
    /// assert!(Path::new("../secret.html").confined().is_err());
    /// ```
    fn confined(&self) -> Result<PathBuf>;
}

impl PathExt for Path {
    fn confined(&self) -> Result<PathBuf> {
        let outside = || Error::PathOutsideBaseDir { name: self.display().to_string() };
        let mut normalized = PathBuf::new();
        for component in self.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(outside());
                    }
                }
                Component::RootDir | Component::Prefix(_) => return Err(outside()),
            }
        }
        Ok(normalized)
    }
}
