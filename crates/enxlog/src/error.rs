use std::borrow::Cow;

/// Errors raised by the logging core and its built-in sinks.
#[enxlog_derive::enxlog_error]
pub enum LogError {
    /// A level name that is not one of `NONE`, `ERROR`, `WARN`, `INFO`, `DEBUG`, `TRACE`.
    #[error("Unknown log level{}: '{name}'", format_context(.context))]
    UnknownLevel { name: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A dotted filter path with an empty part (e.g. `"a..b"` or `""`).
    #[error("Invalid filter path{}: '{path}'", format_context(.context))]
    InvalidFilterPath { path: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A global dispatcher is already installed.
    #[error("Dispatcher already initialized{}", format_context(.context))]
    AlreadyInitialized { context: Option<Cow<'static, str>> },

    /// A sink could not be initialized or used.
    #[error("Sink '{sink}' failed{}: {message}", format_context(.context))]
    Sink {
        sink: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// Underlying IO failure.
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Failure when configuring the rolling file appender (e.g., invalid directory).
    #[error("Rolling file appender error{}: {source}", format_context(.context))]
    Appender { source: tracing_appender::rolling::InitError, context: Option<Cow<'static, str>> },

    /// Internal logic errors.
    #[error("Internal logger error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
