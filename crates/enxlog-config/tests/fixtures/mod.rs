#![allow(dead_code)]

use enxlog::{EntryHeader, Sink};
use enxlog_config::SinkFactory;
use parking_lot::Mutex;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Path of a YAML file under `tests/fixtures`.
#[must_use]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// Collects `logger: message` lines; clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
    current: String,
}

impl MemorySink {
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn open_entry(&mut self, header: &EntryHeader<'_>) -> io::Result<()> {
        self.current = format!("{}: ", header.path.join("."));
        Ok(())
    }

    fn write(&mut self, fragment: &str) -> io::Result<()> {
        self.current.push_str(fragment);
        Ok(())
    }

    fn close_entry(&mut self) -> io::Result<()> {
        self.lines.lock().push(std::mem::take(&mut self.current));
        Ok(())
    }
}

/// Built-in factory plus a `memory` type feeding `sink`.
#[must_use]
pub fn factory_with_memory(sink: &MemorySink) -> SinkFactory {
    let sink = sink.clone();
    SinkFactory::with_builtin().register("memory", move |_| Ok(Box::new(sink.clone())))
}
