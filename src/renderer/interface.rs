use crate::error::Result;
use crate::loader::TemplateSource;
use crate::renderer::RenderOptions;

/// Trait for HTML rendering engines.
///
/// This is the seam used by callers that only need "markup + data in, HTML
/// out", such as per-message mail helpers, so they can be tested against a
/// stub renderer.
pub trait TemplateRenderer: Send + Sync {
    /// Renders a template source with the given context.
    ///
    /// # Arguments
    /// * `source` - Template file name or inline markup
    /// * `context` - Context variables for rendering
    /// * `options` - Per-call options such as stylesheets to inline
    ///
    /// # Returns
    /// * `Result<String>` - Rendered, structurally valid HTML
    fn render_source(
        &self,
        source: &TemplateSource,
        context: &serde_json::Value,
        options: &RenderOptions,
    ) -> Result<String>;

    /// Renders a template given as a file name or as inline markup.
    ///
    /// The argument is classified with [`TemplateSource::detect`].
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        options: &RenderOptions,
    ) -> Result<String> {
        self.render_source(&TemplateSource::detect(template), context, options)
    }
}
