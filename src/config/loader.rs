//! Configuration loading and management

use crate::constants::{CONFIG_FILENAMES, DEFAULT_TEMPLATE_SUFFIX};
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Defaults applied by an engine created for a templates directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "get_default_template_suffix")]
    pub template_suffix: String,
    /// Stylesheet files, relative to the templates directory, inlined before
    /// any stylesheet passed with a render call.
    #[serde(default)]
    pub stylesheets: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_suffix: get_default_template_suffix(),
            stylesheets: Vec::new(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.template_suffix.is_empty() {
            return Err(Error::ConfigValidation("template_suffix must not be empty".into()));
        }
        if !self.template_suffix.starts_with('.') || self.template_suffix.len() < 2 {
            return Err(Error::ConfigValidation(
                "template_suffix must start with '.' and have at least 1 character after it".into(),
            ));
        }
        Ok(())
    }

    /// Parses `content` as the config file `file_name`.
    pub fn parse(file_name: &str, content: &str) -> Result<Self> {
        let config: Config = if file_name.ends_with(".json") {
            serde_json::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads the first config file found in `templates_dir`.
    ///
    /// # Returns
    /// * `Ok(Some(Config))` - A config file was found, parsed and validated
    /// * `Ok(None)` - The directory has no config file
    /// * `Err(Error)` - A config file exists but is unreadable or invalid
    pub fn load_config<P: AsRef<Path>>(templates_dir: P) -> Result<Option<Self>> {
        let templates_dir = templates_dir.as_ref();

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = templates_dir.join(config_file_name);

            if config_file_path.is_file() {
                debug!("Loading config from {}.", config_file_path.display());
                let content = std::fs::read_to_string(&config_file_path)?;
                return Self::parse(config_file_name, &content).map(Some);
            }
        }

        Ok(None)
    }

    /// Like [`Config::load_config`], falling back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(templates_dir: P) -> Result<Self> {
        Ok(Self::load_config(templates_dir)?.unwrap_or_default())
    }
}

fn get_default_template_suffix() -> String {
    DEFAULT_TEMPLATE_SUFFIX.to_string()
}
