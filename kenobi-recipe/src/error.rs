use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for recipe operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Broad class of a recipe error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The recipe or configuration could not be read.
    Io,
    /// The recipe or configuration is not well-formed.
    Parse,
    /// Component or author information is missing or malformed.
    Schema,
    /// A feature option is missing or fails its rule.
    Validation,
    /// A requested feature cannot be composed for the plugin type.
    Composition,
    /// A template failed to render.
    Render,
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("check the path given with --recipe or --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse recipe")]
    #[diagnostic(code(kenobi::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse configuration")]
    #[diagnostic(code(kenobi::config_error))]
    Config {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("recipe must be a mapping of options")]
    #[diagnostic(
        code(kenobi::invalid_recipe),
        help("a recipe starts with top-level keys such as 'component' and 'author'")
    )]
    NotAMapping,

    #[error("'{field}' not specified in the recipe")]
    #[diagnostic(code(kenobi::missing_field))]
    MissingField { field: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Component(pluginkenobi_core::Error),

    #[error("unsupported plugin type '{plugin_type}'")]
    #[diagnostic(
        code(kenobi::unsupported_plugin_type),
        help("supported plugin types are: {supported}")
    )]
    UnsupportedPluginType {
        plugin_type: String,
        supported: String,
    },

    #[error("missing required option '{option}' in {location}")]
    #[diagnostic(code(kenobi::missing_option))]
    MissingOption {
        feature: String,
        location: String,
        option: String,
    },

    #[error("invalid value '{value}' for option '{option}' in {location}")]
    #[diagnostic(code(kenobi::invalid_value), help("{reason}"))]
    InvalidValue {
        feature: String,
        location: String,
        option: String,
        value: String,
        reason: String,
    },

    #[error("unknown {option} '{value}' in {location}")]
    #[diagnostic(code(kenobi::unknown_value), help("expected one of: {expected}"))]
    UnknownValue {
        feature: String,
        location: String,
        option: String,
        value: String,
        expected: String,
    },

    #[error("missing or invalid feature '{feature}'")]
    #[diagnostic(code(kenobi::invalid_feature), help("{reason}"))]
    InvalidFeature { feature: String, reason: String },

    #[error("unknown feature '{feature}' for plugin type '{plugin_type}'")]
    #[diagnostic(
        code(kenobi::unknown_feature),
        help("available features are: {available}")
    )]
    UnknownFeature {
        feature: String,
        plugin_type: String,
        available: String,
    },
}

impl Error {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Box<Self> {
        Box::new(Error::MissingField {
            field: field.into(),
        })
    }

    /// Create a missing or invalid feature error
    pub fn invalid_feature(feature: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidFeature {
            feature: feature.into(),
            reason: reason.into(),
        })
    }

    /// Create an unknown feature error
    pub fn unknown_feature(
        feature: impl Into<String>,
        plugin_type: impl Into<String>,
        available: &[&str],
    ) -> Box<Self> {
        Box::new(Error::UnknownFeature {
            feature: feature.into(),
            plugin_type: plugin_type.into(),
            available: available.join(", "),
        })
    }

    /// Create an unsupported plugin type error
    pub fn unsupported_plugin_type(plugin_type: impl Into<String>, supported: &[&str]) -> Box<Self> {
        Box::new(Error::UnsupportedPluginType {
            plugin_type: plugin_type.into(),
            supported: supported.join(", "),
        })
    }

    /// Create a parse error from a YAML error with source context
    pub fn parse(source: serde_yaml::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source
            .location()
            .map(|location| SourceSpan::from((location.index(), 0)));
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a configuration parse error from a TOML error with source context
    pub fn config(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Config {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// The broad class this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Io { .. } => ErrorCategory::Io,
            Error::Parse { .. } | Error::Config { .. } | Error::NotAMapping => ErrorCategory::Parse,
            Error::MissingField { .. }
            | Error::Component(_)
            | Error::UnsupportedPluginType { .. } => ErrorCategory::Schema,
            Error::MissingOption { .. }
            | Error::InvalidValue { .. }
            | Error::UnknownValue { .. }
            | Error::InvalidFeature { .. } => ErrorCategory::Validation,
            Error::UnknownFeature { .. } => ErrorCategory::Composition,
        }
    }

    /// The option an error refers to, if any.
    pub fn option(&self) -> Option<&str> {
        match self {
            Error::MissingOption { option, .. }
            | Error::InvalidValue { option, .. }
            | Error::UnknownValue { option, .. } => Some(option),
            _ => None,
        }
    }

    /// The feature an error refers to, if any.
    pub fn feature(&self) -> Option<&str> {
        match self {
            Error::MissingOption { feature, .. }
            | Error::InvalidValue { feature, .. }
            | Error::UnknownValue { feature, .. }
            | Error::InvalidFeature { feature, .. }
            | Error::UnknownFeature { feature, .. } => Some(feature),
            _ => None,
        }
    }
}

impl From<pluginkenobi_core::Error> for Box<Error> {
    fn from(error: pluginkenobi_core::Error) -> Self {
        Box::new(Error::Component(error))
    }
}
