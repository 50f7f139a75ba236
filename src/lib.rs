/// Handles argument parsing and the render-to-files workflow.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Shared constants.
pub mod constants;

/// Extension traits for standard library types.
pub mod ext;

/// Sources of template, include and stylesheet text.
pub mod loader;

/// The rendering engine and its per-call options.
pub mod renderer;

/// The text-processing stages a render call runs through.
pub mod template;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Configuration handling for templates directories.
pub mod config;

pub use error::{Error, ErrorKind, Result};
pub use renderer::{RenderOptions, Stylesheet, Templ, TemplateRenderer};
