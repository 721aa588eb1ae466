use std::fmt;

/// A named source of log records.
///
/// The path is the sequence of name parts looked up in the
/// [`FilterTree`](crate::FilterTree), e.g. `["net", "tcp"]`. Loggers are
/// usually declared once as statics with [`declare_logger!`](crate::declare_logger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Logger<'a> {
    path: &'a [&'a str],
}

impl<'a> Logger<'a> {
    /// Creates a logger over the given path parts.
    #[must_use]
    pub const fn new(path: &'a [&'a str]) -> Self {
        Self { path }
    }

    /// Path parts of this logger, outermost first.
    #[must_use]
    pub const fn path(&self) -> &'a [&'a str] {
        self.path
    }
}

impl fmt::Display for Logger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str("::")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

/// Declares a `static` [`Logger`].
///
/// ```rust
/// enxlog::declare_logger!(pub NET_TCP, "net", "tcp");
///
/// assert_eq!(NET_TCP.path(), &["net", "tcp"]);
/// assert_eq!(NET_TCP.to_string(), "net::tcp");
/// ```
#[macro_export]
macro_rules! declare_logger {
    ($vis:vis $name:ident, $($part:literal),+ $(,)?) => {
        $vis static $name: $crate::Logger<'static> = $crate::Logger::new(&[$($part),+]);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    declare_logger!(ONE_TWO, "one", "two");

    #[test]
    fn declared_logger_keeps_its_path() {
        assert_eq!(ONE_TWO.path(), &["one", "two"]);
        assert_eq!(ONE_TWO.to_string(), "one::two");
    }

    #[test]
    fn runtime_paths_are_supported() {
        let parts = vec!["a".to_owned(), "b".to_owned()];
        let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
        let logger = Logger::new(&refs);
        assert_eq!(logger.to_string(), "a::b");
    }
}
