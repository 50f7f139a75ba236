/// Trait implemented by rendering engines.
pub mod interface;
/// The directive-based engine.
pub mod templ;

pub use interface::TemplateRenderer;
pub use templ::Templ;

/// A stylesheet to inline into the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stylesheet {
    /// File name resolved by the engine's loader
    File(String),
    /// Raw CSS
    Inline(String),
}

impl Stylesheet {
    pub fn file(name: impl Into<String>) -> Self {
        Stylesheet::File(name.into())
    }

    pub fn inline(css: impl Into<String>) -> Self {
        Stylesheet::Inline(css.into())
    }
}

impl std::fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stylesheet::File(name) => write!(f, "stylesheet file: '{name}'"),
            Stylesheet::Inline(_) => write!(f, "inline stylesheet"),
        }
    }
}

/// Per-call rendering options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Stylesheets to inline, in output order.
    pub stylesheets: Vec<Stylesheet>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stylesheet.
    pub fn stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheets.push(stylesheet);
        self
    }

    /// Options inlining the given stylesheet files, in order.
    pub fn with_css_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { stylesheets: files.into_iter().map(Stylesheet::file).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_options_in_order() {
        let options = RenderOptions::new()
            .stylesheet(Stylesheet::file("a.css"))
            .stylesheet(Stylesheet::inline("p{}"));
        assert_eq!(
            options.stylesheets,
            vec![
                Stylesheet::File("a.css".into()),
                Stylesheet::Inline("p{}".into())
            ]
        );
        assert_eq!(
            RenderOptions::with_css_files(["a.css", "b.css"]).stylesheets,
            vec![Stylesheet::file("a.css"), Stylesheet::file("b.css")]
        );
    }

    #[test]
    fn test_stylesheet_display() {
        assert_eq!(Stylesheet::file("styles.css").to_string(), "stylesheet file: 'styles.css'");
        assert_eq!(Stylesheet::inline("p{}").to_string(), "inline stylesheet");
    }
}
