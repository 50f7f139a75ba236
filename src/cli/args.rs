use crate::constants::{exit_codes, verbosity};
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for templ.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Render directive-based HTML templates to files.",
    long_about = None
)]
pub struct Args {
    /// Template file names, relative to the templates directory.
    #[arg(value_name = "TEMPLATE", required = true, num_args = 1..)]
    pub templates: Vec<String>,

    /// Directory holding templates, includes, stylesheets and `templ.*` config.
    #[arg(short = 't', long = "templates-dir", value_name = "DIR", default_value = ".")]
    pub templates_dir: PathBuf,

    /// Destination directory for rendered files.
    #[arg(short, long = "output-dir", value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Render data as a JSON object, or `-` to read it from stdin.
    #[arg(short, long)]
    pub data: Option<String>,

    /// Render data from a JSON or YAML file.
    #[arg(long = "data-file", value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Stylesheet files to inline, in order (repeatable).
    #[arg(short, long = "css", value_name = "CSS")]
    pub css: Vec<String>,

    /// Force overwrite of an existing output directory.
    #[arg(short, long)]
    pub force: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
