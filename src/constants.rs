//! Constants used throughout templ

/// Configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["templ.json", "templ.yaml", "templ.yml"];

/// Default suffix that marks a template argument as a file name
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".html";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// HTML elements that never have a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "param", "source", "track", "wbr",
];

/// Directive attribute names
pub mod directives {
    pub const FOR: &str = "*for";
    pub const IF: &str = "*if";
    /// Keyword separating the item name from the source path in `*for`.
    pub const FOR_KEYWORD: &str = "of";
    pub const NEGATION: char = '!';
}

/// Prefix of the names bound to loop iterations
pub const SYNTHETIC_BINDING_PREFIX: &str = "__templ_iter_";

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}

/// Returns true when `tag` (any case) is a void element.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}
