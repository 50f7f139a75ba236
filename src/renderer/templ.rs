use crate::config::Config;
use crate::constants::DEFAULT_TEMPLATE_SUFFIX;
use crate::error::{Error, Result};
use crate::loader::{LocalLoader, TemplateLoader, TemplateSource};
use crate::renderer::{interface::TemplateRenderer, RenderOptions, Stylesheet};
use crate::template::{comments, conditionals, include, interpolate, loops, styles, validate};
use log::{debug, warn};
use serde::Serialize;
use std::borrow::Cow;
use std::path::Path;

/// Directive-based HTML rendering engine.
///
/// The engine only holds its loader and defaults; everything a render call
/// creates (comment table, synthetic bindings, expanded context) lives and
/// dies with that call. One engine can therefore be shared across threads and
/// render concurrently.
pub struct Templ {
    loader: Box<dyn TemplateLoader>,
    template_suffix: String,
    default_stylesheets: Vec<Stylesheet>,
}

impl Templ {
    /// Creates an engine reading templates, includes and stylesheets from
    /// `templates_dir`.
    pub fn new<P: AsRef<Path>>(templates_dir: P) -> Self {
        Self::with_loader(LocalLoader::new(templates_dir.as_ref().to_path_buf()))
    }

    /// Creates an engine backed by a custom loader.
    pub fn with_loader<L: TemplateLoader + 'static>(loader: L) -> Self {
        Self {
            loader: Box::new(loader),
            template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
            default_stylesheets: Vec::new(),
        }
    }

    /// Applies the template suffix and default stylesheets of `config`.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.template_suffix = config.template_suffix.clone();
        self.default_stylesheets = config.stylesheets.iter().map(Stylesheet::file).collect();
        self
    }

    /// Renders `template` (file name or inline markup) with `context`.
    pub fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        options: &RenderOptions,
    ) -> Result<String> {
        let source = TemplateSource::detect_with_suffix(template, &self.template_suffix);
        self.render_source(&source, context, options)
    }

    /// Renders with any serializable value as context.
    pub fn render_serialize<T: Serialize + ?Sized>(
        &self,
        template: &str,
        data: &T,
        options: &RenderOptions,
    ) -> Result<String> {
        let context = serde_json::to_value(data)?;
        self.render(template, &context, options)
    }

    /// Runs the full pipeline for one template.
    ///
    /// Load, guard comments, validate, resolve includes, expand loops, apply
    /// conditionals, interpolate, embed stylesheets, validate again, restore
    /// comments. The first failure aborts the call.
    pub fn render_source(
        &self,
        source: &TemplateSource,
        context: &serde_json::Value,
        options: &RenderOptions,
    ) -> Result<String> {
        debug!("Rendering {source}.");
        let markup = self.load_template(source)?;

        let (guarded, mut comment_table) = comments::extract(&markup);
        validate::check(&guarded).map_err(|reason| {
            warn!("Rejecting {source}: {reason}.");
            Error::InvalidHtmlBefore { reason }
        })?;

        let text =
            include::resolve_includes(&guarded, self.loader.as_ref(), &mut comment_table)?;
        let (text, scope) = loops::expand_loops(&text, context)?;
        debug!("Expanded loops with {} binding(s).", scope.bindings().len());
        let text = conditionals::apply_conditionals(&text, &scope)?;
        let mut html = interpolate::interpolate(&text, &scope);

        // Comment-like text in CSS goes through the same table so that
        // restoring leaves stylesheet bodies unchanged.
        let stylesheets: Vec<String> = self
            .load_stylesheets(options)?
            .iter()
            .map(|css| comment_table.guard(css))
            .collect();
        if !stylesheets.is_empty() {
            debug!("Embedding {} stylesheet(s).", stylesheets.len());
            html = styles::embed_styles(&html, &stylesheets);
        }

        validate::check(&html).map_err(|reason| {
            warn!("Rendering {source} produced invalid markup: {reason}.");
            Error::InvalidHtmlAfter { reason }
        })?;

        Ok(comment_table.restore(&html))
    }

    fn load_template<'s>(&self, source: &'s TemplateSource) -> Result<Cow<'s, str>> {
        match source {
            TemplateSource::File(name) => self.loader.load(name).map(Cow::Owned),
            TemplateSource::Inline(markup) => Ok(Cow::Borrowed(markup)),
        }
    }

    fn load_stylesheets<'o>(&'o self, options: &'o RenderOptions) -> Result<Vec<Cow<'o, str>>> {
        self.default_stylesheets
            .iter()
            .chain(&options.stylesheets)
            .map(|stylesheet| match stylesheet {
                Stylesheet::Inline(css) => Ok(Cow::Borrowed(css.as_str())),
                Stylesheet::File(name) => {
                    self.loader
                        .load(name)
                        .map(Cow::Owned)
                        .map_err(|err| match err {
                            Error::PathOutsideBaseDir { .. } => err,
                            other => Error::StylesheetLoad {
                                name: name.clone(),
                                source: Box::new(other),
                            },
                        })
                }
            })
            .collect()
    }
}

impl TemplateRenderer for Templ {
    fn render_source(
        &self,
        source: &TemplateSource,
        context: &serde_json::Value,
        options: &RenderOptions,
    ) -> Result<String> {
        Templ::render_source(self, source, context, options)
    }

    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        options: &RenderOptions,
    ) -> Result<String> {
        Templ::render(self, template, context, options)
    }
}
