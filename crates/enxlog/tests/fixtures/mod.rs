#![allow(dead_code)]

use chrono::{DateTime, Local};
use enxlog::{EntryHeader, LogError, LogLevel, Sink};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// A record as seen by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub logger: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// Collects closed entries; clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<Captured>>>,
    shutdowns: Arc<Mutex<usize>>,
    current: Option<Captured>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Captured> {
        self.entries.lock().clone()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(|c| c.message.clone()).collect()
    }

    #[must_use]
    pub fn shutdowns(&self) -> usize {
        *self.shutdowns.lock()
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn open_entry(&mut self, header: &EntryHeader<'_>) -> io::Result<()> {
        self.current = Some(Captured {
            logger: header.path.join("."),
            level: header.level,
            message: String::new(),
            timestamp: header.timestamp,
        });
        Ok(())
    }

    fn write(&mut self, fragment: &str) -> io::Result<()> {
        if let Some(current) = &mut self.current {
            current.message.push_str(fragment);
        }
        Ok(())
    }

    fn close_entry(&mut self) -> io::Result<()> {
        if let Some(done) = self.current.take() {
            self.entries.lock().push(done);
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        *self.shutdowns.lock() += 1;
    }
}

/// Where a [`FailingSink`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Init,
    Open,
    Write,
}

#[derive(Debug, Clone)]
pub struct FailingSink {
    at: FailAt,
    shutdowns: Arc<Mutex<usize>>,
}

impl FailingSink {
    #[must_use]
    pub fn new(at: FailAt) -> Self {
        Self { at, shutdowns: Arc::default() }
    }

    #[must_use]
    pub fn shutdowns(&self) -> usize {
        *self.shutdowns.lock()
    }
}

impl Sink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    fn init(&mut self) -> Result<(), LogError> {
        if self.at == FailAt::Init {
            return Err(LogError::Sink {
                sink: "failing".into(),
                message: "refused".into(),
                context: None,
            });
        }
        Ok(())
    }

    fn open_entry(&mut self, _header: &EntryHeader<'_>) -> io::Result<()> {
        if self.at == FailAt::Open {
            return Err(io::Error::other("open refused"));
        }
        Ok(())
    }

    fn write(&mut self, _fragment: &str) -> io::Result<()> {
        if self.at == FailAt::Write {
            return Err(io::Error::other("write refused"));
        }
        Ok(())
    }

    fn close_entry(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn shutdown(&mut self) {
        *self.shutdowns.lock() += 1;
    }
}
