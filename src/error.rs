use std::fmt;
use thiserror::Error;

use crate::template::validate::Imbalance;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to load template '{path}'. Original error: {source}")]
    TemplateLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An `<include>` target could not be loaded.
    #[error("Failed to load include '{name}'. Original error: {source}")]
    IncludeLoad {
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to load stylesheet '{name}'. Original error: {source}")]
    StylesheetLoad {
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Cannot load '{name}': path escapes the templates directory.")]
    PathOutsideBaseDir { name: String },

    #[error("Invalid HTML content before rendering: {reason}.")]
    InvalidHtmlBefore { reason: Imbalance },

    /// The engine produced unbalanced markup. Treated as an internal defect,
    /// never as a user input error.
    #[error("Invalid HTML content after rendering: {reason}.")]
    InvalidHtmlAfter { reason: Imbalance },

    #[error("Unterminated {directive}=\"{expression}\": no closing </{tag}> found.")]
    UnterminatedDirective {
        directive: &'static str,
        expression: String,
        tag: String,
    },

    #[error("Expected array for *for=\"{item} of {source_path}\", got {kind}")]
    LoopSourceType {
        item: String,
        source_path: String,
        kind: &'static str,
    },

    #[error("Invalid loop expression *for=\"{expression}\", expected 'item of path'.")]
    InvalidLoopExpression { expression: String },

    #[error("Failed to convert render data into a context. Original error: {0}")]
    ContextSerialization(#[from] serde_json::Error),

    #[error("Failed to parse config file. Original error: {0}")]
    ConfigParse(String),

    #[error("Configuration validation failed: {0}.")]
    ConfigValidation(String),

    /// Render data given on the command line is not a JSON or YAML object.
    #[error("Failed to parse render data: {0}.")]
    DataParse(String),

    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

/// Stable, machine-readable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TemplateLoadFailure,
    IncludeLoadFailure,
    StylesheetLoadFailure,
    PathOutsideBaseDir,
    InvalidHtmlBefore,
    InvalidHtmlAfter,
    UnterminatedDirective,
    LoopSourceTypeError,
    InvalidLoopExpression,
    ContextSerialization,
    Config,
    DataParse,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TemplateLoadFailure => "template-load-failure",
            ErrorKind::IncludeLoadFailure => "include-load-failure",
            ErrorKind::StylesheetLoadFailure => "stylesheet-load-failure",
            ErrorKind::PathOutsideBaseDir => "path-outside-base-dir",
            ErrorKind::InvalidHtmlBefore => "invalid-html-before",
            ErrorKind::InvalidHtmlAfter => "invalid-html-after",
            ErrorKind::UnterminatedDirective => "unterminated-directive",
            ErrorKind::LoopSourceTypeError => "loop-source-type-error",
            ErrorKind::InvalidLoopExpression => "invalid-loop-expression",
            ErrorKind::ContextSerialization => "context-serialization",
            ErrorKind::Config => "config",
            ErrorKind::DataParse => "data-parse",
            ErrorKind::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Returns the classification used by callers to tell failures apart.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IoError(_) | Error::OutputDirectoryExistsError { .. } => ErrorKind::Io,
            Error::TemplateLoad { .. } => ErrorKind::TemplateLoadFailure,
            Error::IncludeLoad { .. } => ErrorKind::IncludeLoadFailure,
            Error::StylesheetLoad { .. } => ErrorKind::StylesheetLoadFailure,
            Error::PathOutsideBaseDir { .. } => ErrorKind::PathOutsideBaseDir,
            Error::InvalidHtmlBefore { .. } => ErrorKind::InvalidHtmlBefore,
            Error::InvalidHtmlAfter { .. } => ErrorKind::InvalidHtmlAfter,
            Error::UnterminatedDirective { .. } => ErrorKind::UnterminatedDirective,
            Error::LoopSourceType { .. } => ErrorKind::LoopSourceTypeError,
            Error::InvalidLoopExpression { .. } => ErrorKind::InvalidLoopExpression,
            Error::ContextSerialization(_) => ErrorKind::ContextSerialization,
            Error::ConfigParse(_) | Error::ConfigValidation(_) => ErrorKind::Config,
            Error::DataParse(_) => ErrorKind::DataParse,
        }
    }
}

/// Convenience type alias for Results with templ's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_source_type_message_names_expression_and_kind() {
        let err = Error::LoopSourceType {
            item: "item".into(),
            source_path: "items".into(),
            kind: "string",
        };
        assert_eq!(err.to_string(), "Expected array for *for=\"item of items\", got string");
        assert_eq!(err.kind(), ErrorKind::LoopSourceTypeError);
    }

    #[test]
    fn kinds_render_as_kebab_case() {
        assert_eq!(ErrorKind::InvalidHtmlBefore.to_string(), "invalid-html-before");
        assert_eq!(ErrorKind::UnterminatedDirective.as_str(), "unterminated-directive");
    }

    #[test]
    fn yaml_errors_become_config_parse_errors() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{").unwrap_err();
        let err: Error = yaml_err.into();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
