use crate::constants::DEFAULT_TEMPLATE_SUFFIX;

pub mod interface;
pub mod local;
pub mod memory;

pub use interface::TemplateLoader;
pub use local::LocalLoader;
pub use memory::MemoryLoader;

/// Where the markup of a render call comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// File name resolved by the engine's loader
    File(String),
    /// Literal markup
    Inline(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::File(name) => write!(f, "template file: '{name}'"),
            TemplateSource::Inline(_) => write!(f, "inline template"),
        }
    }
}

impl TemplateSource {
    /// Classifies a template argument using the default `.html` suffix.
    pub fn detect(template: &str) -> Self {
        Self::detect_with_suffix(template, DEFAULT_TEMPLATE_SUFFIX)
    }

    /// Treats `template` as a file name when it ends in `suffix` and holds no
    /// markup; anything else is inline markup.
    pub fn detect_with_suffix(template: &str, suffix: &str) -> Self {
        let candidate = template.trim();
        if candidate.ends_with(suffix) && !candidate.contains('<') {
            TemplateSource::File(candidate.to_string())
        } else {
            TemplateSource::Inline(template.to_string())
        }
    }
}
