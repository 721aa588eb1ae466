use enxlog::LogError;
use std::borrow::Cow;

/// Errors raised while reading a configuration or building its dispatcher.
#[enxlog_derive::enxlog_error]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Configuration IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Malformed YAML or a value of the wrong shape. `line` and `column` are
    /// 1-based when the YAML layer knows the position.
    #[error("Configuration syntax error{}: {message}", format_context(.context))]
    Syntax {
        message: Cow<'static, str>,
        line: Option<usize>,
        column: Option<usize>,
        context: Option<Cow<'static, str>>,
    },

    /// The document root is not a mapping (this includes an empty document).
    #[error("Unexpected input{}: expected a mapping at the document root, found {found}", format_context(.context))]
    UnexpectedInput { found: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No creator is registered for the sink `type`.
    #[error("Unknown sink type{}: '{sink_type}'", format_context(.context))]
    UnknownSinkType { sink_type: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A sink is missing a required parameter.
    #[error("Sink '{sink_type}' should specify '{parameter}'{}", format_context(.context))]
    MissingParameter {
        sink_type: Cow<'static, str>,
        parameter: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A sink parameter has an unusable value.
    #[error("Invalid value '{value}' for sink parameter '{parameter}'{}", format_context(.context))]
    InvalidParameter {
        parameter: Cow<'static, str>,
        value: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The logging core rejected the configuration (e.g. a sink failed to initialize).
    #[error("Logging error{}: {source}", format_context(.context))]
    Log { source: LogError, context: Option<Cow<'static, str>> },

    /// Internal logic errors.
    #[error("Internal configuration error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ConfigError {
    /// `(line, column)` of a syntax error, if known.
    #[must_use]
    pub const fn location(&self) -> Option<(usize, usize)> {
        match self {
            Self::Syntax { line: Some(line), column: Some(column), .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(error: serde_yaml::Error) -> Self {
        let location = error.location();
        Self::Syntax {
            message: error.to_string().into(),
            line: location.as_ref().map(serde_yaml::Location::line),
            column: location.as_ref().map(serde_yaml::Location::column),
            context: None,
        }
    }
}
