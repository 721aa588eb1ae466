//! # enxlog-config
//!
//! Builds an [`enxlog::Dispatcher`] from a YAML document:
//!
//! ```yaml
//! options:
//!   default_loglevel: WARN
//! sinks:
//!   - type: stdout_color
//!   - type: file
//!     path: /var/log/app.log
//! filter:
//!   net.tcp: DEBUG
//!   db: ERROR
//! ```
//!
//! * `options`: `default_loglevel` for loggers without a filter entry.
//! * `sink` / `sinks`: one sink mapping, or a list of them. Every sink needs a
//!   `type`; the other keys are passed to the [`SinkFactory`] as
//!   [`SinkParameters`].
//! * `filter`: dotted logger paths and their levels.
//!
//! Sections may be repeated: each `sink` adds a sink, and later `filter` and
//! `options` entries override earlier ones.
//!
//! ## Example
//!
//! ```rust,no_run
//! let dispatcher = enxlog_config::load("logging.yaml")?;
//! enxlog::init(dispatcher)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod factory;
mod parameters;
mod parser;

pub use crate::error::{ConfigError, ConfigErrorExt};
pub use crate::factory::{SinkCreator, SinkFactory};
pub use crate::parameters::SinkParameters;
pub use crate::parser::ConfigDocument;

use enxlog::Dispatcher;
use std::path::Path;

/// Parses the file at `path` and builds its dispatcher with the built-in sinks.
pub fn load(path: impl AsRef<Path>) -> Result<Dispatcher, ConfigError> {
    ConfigDocument::from_file(path)?.build(&SinkFactory::with_builtin())
}
