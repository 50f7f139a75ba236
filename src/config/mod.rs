//! Configuration management for templ
//!
//! A templates directory may carry a `templ.json`, `templ.yaml` or `templ.yml`
//! file holding defaults for every render done from it:
//! - `template_suffix`: suffix marking a template argument as a file name
//! - `stylesheets`: stylesheet files inlined into every rendered document

pub mod loader;


pub use loader::Config;
