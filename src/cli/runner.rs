use crate::{
    cli::Args,
    config::Config,
    error::Result,
    ext::PathExt,
    ioutils::{collect_data, get_output_dir, write_file},
    loader::TemplateSource,
    renderer::{RenderOptions, Templ},
};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Renders every template named on the command line into the output directory
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the complete rendering workflow
    ///
    /// Every template is rendered before anything is written, so a failing
    /// template leaves the output directory untouched.
    pub fn run(self) -> Result<()> {
        let output_root = get_output_dir(&self.args.output_dir, self.args.force)?;

        let config = Config::load_or_default(&self.args.templates_dir)?;
        debug!("Using config: {config:?}");

        let engine = Templ::new(&self.args.templates_dir).with_config(&config);
        let context = collect_data(self.args.data.as_deref(), self.args.data_file.as_deref())?;
        let options = RenderOptions::with_css_files(self.args.css.iter().cloned());

        let mut rendered = Vec::with_capacity(self.args.templates.len());
        for template in &self.args.templates {
            let dest = self.destination(&output_root, template)?;
            let html = engine.render_source(
                &TemplateSource::File(template.clone()),
                &context,
                &options,
            )?;
            rendered.push((template, dest, html));
        }

        for (template, dest, html) in rendered {
            write_file(&html, &dest)?;
            info!("Rendered '{template}' to {}.", dest.display());
        }

        println!(
            "Rendered {} template(s) into {}.",
            self.args.templates.len(),
            output_root.display()
        );
        Ok(())
    }

    /// Mirrors the template's relative path under the output directory
    fn destination(&self, output_root: &Path, template: &str) -> Result<PathBuf> {
        Ok(output_root.join(Path::new(template).confined()?))
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<()> {
    let runner = Runner::new(args);
    runner.run()
}
