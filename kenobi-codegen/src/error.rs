use miette::Diagnostic;
use pluginkenobi_recipe::ErrorCategory;
use thiserror::Error;

/// Result type for composition and generation
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Recipe(pluginkenobi_recipe::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Core(#[from] pluginkenobi_core::Error),

    #[error("output path '{path}' is generated more than once")]
    #[diagnostic(
        code(kenobi::duplicate_output),
        help("two features or entries resolve to the same file, rename one of them")
    )]
    DuplicateOutput { path: String },

    #[error("failed to register template '{template}'")]
    #[diagnostic(code(kenobi::template))]
    TemplateRegistration {
        template: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("failed to render template '{template}' for '{path}'")]
    #[diagnostic(code(kenobi::render))]
    Render {
        template: String,
        path: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

impl From<Box<pluginkenobi_recipe::Error>> for Error {
    fn from(error: Box<pluginkenobi_recipe::Error>) -> Self {
        Error::Recipe(*error)
    }
}

impl Error {
    /// The broad class this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Recipe(e) => e.category(),
            Error::Core(pluginkenobi_core::Error::InvalidComponent { .. }) => ErrorCategory::Schema,
            Error::Core(_) => ErrorCategory::Io,
            Error::DuplicateOutput { .. } => ErrorCategory::Composition,
            Error::TemplateRegistration { .. } | Error::Render { .. } => ErrorCategory::Render,
        }
    }
}
