use super::{EntryHeader, Sink};
use crate::level::LogLevel;
use colored::Colorize;
use std::io::{self, Stdout, Write};

/// Rendering of the header written by a [`ConsoleSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStyle {
    Plain,
    /// ANSI colours; honours `NO_COLOR`/`CLICOLOR` and non-terminal outputs.
    Color,
}

/// Writes records to a console-like stream.
///
/// Continuation lines of multi-line messages are indented to the width of the
/// header so that the message column stays aligned.
#[derive(Debug)]
pub struct ConsoleSink<W: Write + Send = Stdout> {
    writer: W,
    style: ConsoleStyle,
    indent: usize,
}

impl ConsoleSink<Stdout> {
    /// Plain records on standard output (sink type `stdout`).
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout(), ConsoleStyle::Plain)
    }

    /// Coloured records on standard output (sink type `stdout_color`).
    #[must_use]
    pub fn stdout_color() -> Self {
        Self::with_writer(io::stdout(), ConsoleStyle::Color)
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    #[must_use]
    pub const fn with_writer(writer: W, style: ConsoleStyle) -> Self {
        Self { writer, style, indent: 0 }
    }

    #[must_use]
    pub const fn style(&self) -> ConsoleStyle {
        self.style
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored_header(&mut self, header: &EntryHeader<'_>) -> io::Result<()> {
        let level = match header.level {
            LogLevel::Error => header.level.tag().red(),
            LogLevel::Warn => header.level.tag().bright_yellow(),
            _ => header.level.tag().normal(),
        };
        write!(
            self.writer,
            "{} {}{}: ",
            header.timestamp_text().bright_black(),
            level,
            header.location_text().yellow()
        )
    }
}

impl<W: Write + Send> Sink for ConsoleSink<W> {
    fn name(&self) -> &str {
        match self.style {
            ConsoleStyle::Plain => "stdout",
            ConsoleStyle::Color => "stdout_color",
        }
    }

    fn open_entry(&mut self, header: &EntryHeader<'_>) -> io::Result<()> {
        let plain = header.plain_text();
        self.indent = plain.chars().count();

        match self.style {
            ConsoleStyle::Plain => self.writer.write_all(plain.as_bytes()),
            ConsoleStyle::Color => self.write_colored_header(header),
        }
    }

    fn write(&mut self, fragment: &str) -> io::Result<()> {
        let mut lines = fragment.split('\n');
        if let Some(first) = lines.next() {
            self.writer.write_all(first.as_bytes())?;
        }
        for line in lines {
            write!(self.writer, "\n{:indent$}", "", indent = self.indent)?;
            self.writer.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    fn close_entry(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    fn shutdown(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use serial_test::serial;

    fn header<'a>(path: &'a [&'a str], level: LogLevel) -> EntryHeader<'a> {
        EntryHeader {
            path,
            level,
            module: "demo",
            line: 7,
            timestamp: Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    fn render(style: ConsoleStyle, level: LogLevel, fragments: &[&str]) -> String {
        let mut sink = ConsoleSink::with_writer(Vec::new(), style);
        sink.open_entry(&header(&["one"], level)).unwrap();
        for fragment in fragments {
            sink.write(fragment).unwrap();
        }
        sink.close_entry().unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn plain_entry_is_one_line() {
        let out = render(ConsoleStyle::Plain, LogLevel::Info, &["value=", "42"]);
        assert_eq!(out, "2024-01-02 03:04:05.000 -- INFO  -- one::demo:7: value=42\n");
    }

    #[test]
    fn continuation_lines_are_aligned() {
        let out = render(ConsoleStyle::Plain, LogLevel::Error, &["first\nsecond"]);
        let prefix = "2024-01-02 03:04:05.000 -- ERROR -- one::demo:7: ";
        let expected = format!("{prefix}first\n{}second\n", " ".repeat(prefix.len()));
        assert_eq!(out, expected);
    }

    #[test]
    fn lone_newline_fragment_indents() {
        let out = render(ConsoleStyle::Plain, LogLevel::Debug, &["a", "\n", "b"]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].trim_start(), "b");
        assert_eq!(lines[1].len(), lines[0].len());
    }

    #[test]
    #[serial(colored)]
    fn colored_header_uses_level_colors() {
        colored::control::set_override(true);
        let error = render(ConsoleStyle::Color, LogLevel::Error, &["boom"]);
        let warn = render(ConsoleStyle::Color, LogLevel::Warn, &["careful"]);
        let info = render(ConsoleStyle::Color, LogLevel::Info, &["fine"]);
        colored::control::unset_override();

        assert!(error.starts_with("\x1b[90m2024-01-02 03:04:05.000\x1b[0m "), "{error:?}");
        assert!(error.contains(" \x1b[31m-- ERROR -- \x1b[0m"), "{error:?}");
        assert!(error.ends_with("\x1b[33mone::demo:7\x1b[0m: boom\n"), "{error:?}");
        assert!(warn.contains(" \x1b[93m-- WARN  -- \x1b[0m"), "{warn:?}");
        assert!(info.contains(" -- INFO  -- \x1b[33m"), "{info:?}");
    }

    #[test]
    #[serial(colored)]
    fn colored_entry_keeps_text() {
        let out = render(ConsoleStyle::Color, LogLevel::Warn, &["careful"]);
        assert!(out.contains("-- WARN  -- "));
        assert!(out.contains("one::demo:7"));
        assert!(out.ends_with("careful\n"));
    }

    #[test]
    fn names_follow_style() {
        assert_eq!(ConsoleSink::stdout().name(), "stdout");
        assert_eq!(ConsoleSink::stdout_color().name(), "stdout_color");
    }
}
