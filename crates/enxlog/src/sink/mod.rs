//! Output destinations for log records.
//!
//! A [`Sink`] receives every emitted record as a stream:
//! [`open_entry`](Sink::open_entry) with the record header, any number of
//! [`write`](Sink::write) calls with message fragments, then
//! [`close_entry`](Sink::close_entry). The [`Dispatcher`](crate::Dispatcher)
//! holds its lock for the whole sequence, so sinks never see interleaved entries.

mod bridge;
mod console;
mod file;
mod rolling;

pub use bridge::TracingSink;
pub use console::{ConsoleSink, ConsoleStyle};
pub use file::FileSink;
pub use rolling::{RollingFileSink, Rotation};

use crate::error::LogError;
use crate::level::LogLevel;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::io;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Everything known about a record before its message is written.
#[derive(Debug, Clone)]
pub struct EntryHeader<'a> {
    /// Path parts of the emitting logger.
    pub path: &'a [&'a str],
    pub level: LogLevel,
    /// Module of the call site (`module_path!()`).
    pub module: &'a str,
    pub line: u32,
    pub timestamp: DateTime<Local>,
}

impl<'a> EntryHeader<'a> {
    /// Header stamped with the current local time.
    #[must_use]
    pub fn now(path: &'a [&'a str], level: LogLevel, module: &'a str, line: u32) -> Self {
        Self { path, level, module, line, timestamp: Local::now() }
    }

    /// `YYYY-MM-DD HH:MM:SS.mmm`
    #[must_use]
    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `part1::part2::module:line`
    #[must_use]
    pub fn location_text(&self) -> String {
        let mut out = String::new();
        for part in self.path {
            out.push_str(part);
            out.push_str("::");
        }
        let _ = write!(out, "{}:{}", self.module, self.line);
        out
    }

    /// Uncoloured header as written by the built-in sinks, including the
    /// trailing separator before the message.
    #[must_use]
    pub fn plain_text(&self) -> String {
        format!("{} {}{}: ", self.timestamp_text(), self.level.tag(), self.location_text())
    }
}

/// An output destination.
///
/// Only [`open_entry`](Sink::open_entry), [`write`](Sink::write) and
/// [`close_entry`](Sink::close_entry) are required. IO failures are reported
/// by the dispatcher and never reach the logging call site.
pub trait Sink: Send {
    /// Short identifier used in diagnostics (`"stdout"`, `"file"`, ...).
    fn name(&self) -> &str;

    /// Acquires resources. Called once by
    /// [`DispatcherBuilder::build`](crate::DispatcherBuilder::build) before any record.
    fn init(&mut self) -> Result<(), LogError> {
        Ok(())
    }

    fn open_entry(&mut self, header: &EntryHeader<'_>) -> io::Result<()>;

    /// Writes one fragment of the formatted message.
    fn write(&mut self, fragment: &str) -> io::Result<()>;

    fn close_entry(&mut self) -> io::Result<()>;

    /// Releases resources. Called at most once, after the last record.
    fn shutdown(&mut self) {}
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn init(&mut self) -> Result<(), LogError> {
        (**self).init()
    }

    fn open_entry(&mut self, header: &EntryHeader<'_>) -> io::Result<()> {
        (**self).open_entry(header)
    }

    fn write(&mut self, fragment: &str) -> io::Result<()> {
        (**self).write(fragment)
    }

    fn close_entry(&mut self) -> io::Result<()> {
        (**self).close_entry()
    }

    fn shutdown(&mut self) {
        (**self).shutdown();
    }
}

fn not_initialized(sink: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, format!("{sink} sink is not initialized"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_header<'a>(path: &'a [&'a str]) -> EntryHeader<'a> {
        EntryHeader {
            path,
            level: LogLevel::Warn,
            module: "app::net",
            line: 42,
            timestamp: Local.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap(),
        }
    }

    #[test]
    fn plain_header_layout() {
        let header = fixed_header(&["one", "two"]);
        assert_eq!(
            header.plain_text(),
            "2023-04-05 06:07:08.000 -- WARN  -- one::two::app::net:42: "
        );
    }

    #[test]
    fn empty_path_has_only_location() {
        let header = fixed_header(&[]);
        assert_eq!(header.location_text(), "app::net:42");
    }
}
