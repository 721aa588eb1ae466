use super::{EntryHeader, Sink, not_initialized};
use crate::error::{LogError, LogErrorExt};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_appender::rolling::RollingFileAppender;

pub use tracing_appender::rolling::Rotation;

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Writes records to time-rotated files (sink type `rolling_file`).
///
/// Files are named `<prefix>.<date>.log` inside `directory`; at most
/// `max_files` are kept. A whole entry is written at once when it closes, so a
/// rotation never splits an entry across two files.
#[derive(Debug)]
pub struct RollingFileSink {
    directory: PathBuf,
    prefix: String,
    rotation: Rotation,
    max_files: usize,
    appender: Option<RollingFileAppender>,
    line: String,
}

impl RollingFileSink {
    /// Daily rotation, keeping ten files.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            appender: None,
            line: String::new(),
        }
    }

    #[must_use = "The sink must be configured before it is handed to a dispatcher."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use = "The sink must be configured before it is handed to a dispatcher."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    fn validate(&self) -> Result<(), LogError> {
        if self.prefix.trim().is_empty() {
            return Err(LogError::Sink {
                sink: "rolling_file".into(),
                message: "prefix cannot be empty".into(),
                context: None,
            });
        }

        if self.max_files == 0 {
            return Err(LogError::Sink {
                sink: "rolling_file".into(),
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }

        Ok(())
    }
}

impl Sink for RollingFileSink {
    fn name(&self) -> &str {
        "rolling_file"
    }

    fn init(&mut self) -> Result<(), LogError> {
        self.validate()?;

        let appender = RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(&self.prefix)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(self.max_files)
            .build(&self.directory)
            .context(format!("Failed to open directory: {}", self.directory.display()))?;

        debug!(directory = %self.directory.display(), prefix = %self.prefix, "Rolling file sink opened");
        self.appender = Some(appender);
        Ok(())
    }

    fn open_entry(&mut self, header: &EntryHeader<'_>) -> io::Result<()> {
        if self.appender.is_none() {
            return Err(not_initialized("rolling_file"));
        }
        self.line.clear();
        self.line.push_str(&header.plain_text());
        Ok(())
    }

    fn write(&mut self, fragment: &str) -> io::Result<()> {
        self.line.push_str(fragment);
        Ok(())
    }

    fn close_entry(&mut self) -> io::Result<()> {
        let appender = self.appender.as_mut().ok_or_else(|| not_initialized("rolling_file"))?;
        self.line.push('\n');
        appender.write_all(self.line.as_bytes())?;
        appender.flush()
    }

    fn shutdown(&mut self) {
        if let Some(mut appender) = self.appender.take() {
            let _ = appender.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LogLevel;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn rejects_zero_max_files() {
        let mut sink = RollingFileSink::new("logs", "app").max_files(0);
        let err = sink.init().unwrap_err();
        assert_eq!(err.kind(), "Sink");
        assert!(err.to_string().contains("max_files"));
    }

    #[test]
    fn rejects_blank_prefix() {
        let mut sink = RollingFileSink::new("logs", "  ");
        assert_eq!(sink.init().unwrap_err().kind(), "Sink");
    }

    #[test]
    fn writes_into_prefixed_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut sink = RollingFileSink::new(dir.path(), "svc").rotation(Rotation::NEVER);
        sink.init()?;
        sink.open_entry(&EntryHeader::now(&["a"], LogLevel::Error, "tests", 3))?;
        sink.write("rolled")?;
        sink.close_entry()?;
        sink.shutdown();

        let log = fs::read_dir(dir.path())?
            .flatten()
            .map(|entry| entry.path())
            .find(|path| path.extension().and_then(|e| e.to_str()) == Some("log"))
            .expect("log file should be created");

        let content = fs::read_to_string(log)?;
        assert!(content.ends_with("-- ERROR -- a::tests:3: rolled\n"));
        Ok(())
    }
}
