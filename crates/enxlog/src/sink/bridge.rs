use super::{EntryHeader, Sink};
use crate::level::LogLevel;
use std::io;
use tracing::{debug, error, info, trace, warn};

/// Forwards records to the `tracing` ecosystem (sink type `tracing`).
///
/// Each closed entry becomes one event with target `enxlog` and the fields
/// `logger`, `module` and `line`.
#[derive(Debug, Default)]
pub struct TracingSink {
    level: LogLevel,
    logger: String,
    module: String,
    line: u32,
    message: String,
}

impl TracingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    fn open_entry(&mut self, header: &EntryHeader<'_>) -> io::Result<()> {
        self.level = header.level;
        self.logger = header.path.join("::");
        self.module.clear();
        self.module.push_str(header.module);
        self.line = header.line;
        self.message.clear();
        Ok(())
    }

    fn write(&mut self, fragment: &str) -> io::Result<()> {
        self.message.push_str(fragment);
        Ok(())
    }

    fn close_entry(&mut self) -> io::Result<()> {
        let (logger, module, line, message) =
            (self.logger.as_str(), self.module.as_str(), self.line, self.message.as_str());

        match self.level {
            LogLevel::None => {},
            LogLevel::Error => error!(target: "enxlog", logger, module, line, "{message}"),
            LogLevel::Warn => warn!(target: "enxlog", logger, module, line, "{message}"),
            LogLevel::Info => info!(target: "enxlog", logger, module, line, "{message}"),
            LogLevel::Debug => debug!(target: "enxlog", logger, module, line, "{message}"),
            LogLevel::Trace => trace!(target: "enxlog", logger, module, line, "{message}"),
        }
        Ok(())
    }
}
