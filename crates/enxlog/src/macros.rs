/// Logs a record at an explicit level through the global dispatcher.
///
/// The message arguments are only evaluated when the level is enabled for
/// the logger.
///
/// ```rust
/// use enxlog::{LogLevel, declare_logger, log};
///
/// declare_logger!(NET, "net");
///
/// log!(NET, LogLevel::Info, "listening on port {}", 8080);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger<'_> = &$logger;
        let level: $crate::LogLevel = $level;
        if $crate::enabled(logger, level) {
            $crate::dispatch(logger, level, ::std::module_path!(), ::std::line!(), ::std::format_args!($($arg)+));
        }
    }};
}

/// Logs at [`LogLevel::Error`](crate::LogLevel::Error).
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::LogLevel::Error, $($arg)+) };
}

/// Logs at [`LogLevel::Warn`](crate::LogLevel::Warn).
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+) };
}

/// Logs at [`LogLevel::Info`](crate::LogLevel::Info).
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::LogLevel::Info, $($arg)+) };
}

/// Logs at [`LogLevel::Debug`](crate::LogLevel::Debug).
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+) };
}

/// Logs at [`LogLevel::Trace`](crate::LogLevel::Trace).
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+) };
}
