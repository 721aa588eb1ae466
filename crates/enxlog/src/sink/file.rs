use super::{EntryHeader, Sink, not_initialized};
use crate::error::{LogError, LogErrorExt};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Appends records to a single file (sink type `file`).
///
/// The file, and its parent directory, are created by [`Sink::init`] if
/// missing. Every entry is flushed when it closes.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl FileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), file: None }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.file.as_mut().ok_or_else(|| not_initialized("file"))
    }
}

impl Sink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn init(&mut self) -> Result<(), LogError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .context(format!("Could not open log file: {}", self.path.display()))?;

        debug!(path = %self.path.display(), "File sink opened");
        self.file = Some(BufWriter::new(file));
        Ok(())
    }

    fn open_entry(&mut self, header: &EntryHeader<'_>) -> io::Result<()> {
        let text = header.plain_text();
        self.file()?.write_all(text.as_bytes())
    }

    fn write(&mut self, fragment: &str) -> io::Result<()> {
        self.file()?.write_all(fragment.as_bytes())
    }

    fn close_entry(&mut self) -> io::Result<()> {
        let file = self.file()?;
        file.write_all(b"\n")?;
        file.flush()
    }

    fn shutdown(&mut self) {
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LogLevel;
    use tempfile::tempdir;

    #[test]
    fn writes_before_init_fail() {
        let mut sink = FileSink::new("unused.log");
        let err = sink.write("x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[test]
    fn appends_entries_and_creates_parents() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("app.log");

        for message in ["first", "second"] {
            let mut sink = FileSink::new(&path);
            sink.init()?;
            sink.open_entry(&EntryHeader::now(&["svc"], LogLevel::Info, "tests", 1))?;
            sink.write(message)?;
            sink.close_entry()?;
            sink.shutdown();
        }

        let content = fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("-- INFO  -- svc::tests:1: first"));
        assert!(lines[1].ends_with("second"));
        Ok(())
    }

    #[test]
    fn init_reports_unopenable_path() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut sink = FileSink::new(dir.path());

        let err = sink.init().unwrap_err();
        assert_eq!(err.kind(), "Io");
        assert!(err.to_string().contains("Could not open log file"));
        Ok(())
    }
}
