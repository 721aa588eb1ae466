use crate::error::LogError;
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, and the threshold a filter node carries.
///
/// Levels are ordered from the most restrictive threshold (`None`, nothing is
/// emitted) to the most verbose (`Trace`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    #[default]
    None = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Every level, from `None` to `Trace`.
    pub const ALL: [Self; 6] =
        [Self::None, Self::Error, Self::Warn, Self::Info, Self::Debug, Self::Trace];

    /// Canonical upper-case name, as accepted in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    /// Fixed-width severity tag written by the built-in sinks.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Error => "-- ERROR -- ",
            Self::Warn => "-- WARN  -- ",
            Self::Info => "-- INFO  -- ",
            Self::Debug => "-- DEBUG -- ",
            Self::Trace => "-- TRACE -- ",
        }
    }

    /// Whether a record at `record` passes a threshold of `self`.
    ///
    /// `None` records never pass.
    #[must_use]
    pub fn allows(self, record: Self) -> bool {
        record != Self::None && record <= self
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL.into_iter().find(|level| level.as_str().eq_ignore_ascii_case(name)).ok_or_else(
            || LogError::UnknownLevel { name: name.to_owned().into(), context: None },
        )
    }
}
