//! # enxlog
//!
//! Hierarchical, sink-based logging.
//!
//! Every [`Logger`] is identified by a path such as `["net", "tcp"]`. A
//! [`FilterTree`] maps path prefixes to a [`LogLevel`]; the deepest matching
//! entry wins, and loggers whose first part is not in the tree fall back to
//! the dispatcher's default level. Enabled records are streamed to every
//! [`Sink`] of the [`Dispatcher`].
//!
//! * Built-in sinks: [`ConsoleSink`] (plain or colored stdout), [`FileSink`],
//!   [`RollingFileSink`] and [`TracingSink`].
//! * Message arguments are only formatted when the record is enabled.
//! * [`Hex`] and [`HexBytes`] render fixed-width hexadecimal arguments.
//! * YAML configuration lives in the `enxlog-config` crate.
//!
//! ## Example
//!
//! ```rust
//! use enxlog::{ConsoleSink, Dispatcher, FilterTree, LogLevel, declare_logger, log_debug, log_info};
//!
//! declare_logger!(TCP, "net", "tcp");
//!
//! let dispatcher = Dispatcher::builder()
//!     .default_level(LogLevel::Warn)
//!     .filter(FilterTree::new().with("net.tcp", LogLevel::Debug))
//!     .sink(ConsoleSink::stdout())
//!     .build()?;
//!
//! enxlog::init(dispatcher)?;
//! log_info!(TCP, "connected to {}", "10.0.0.1");
//! log_debug!(TCP, "{} bytes queued", 42);
//! enxlog::shutdown();
//! # Ok::<(), enxlog::LogError>(())
//! ```

mod dispatcher;
mod error;
mod filter;
mod global;
mod hex;
mod level;
mod logger;
mod macros;
pub mod sink;

pub use crate::dispatcher::{Dispatcher, DispatcherBuilder};
pub use crate::error::{LogError, LogErrorExt};
pub use crate::filter::{FilterEntry, FilterTree};
pub use crate::global::{dispatch, enabled, init, is_initialized, shutdown};
pub use crate::hex::{Hex, HexBytes};
pub use crate::level::LogLevel;
pub use crate::logger::Logger;
pub use crate::sink::{ConsoleSink, ConsoleStyle, EntryHeader, FileSink, RollingFileSink, Rotation, Sink, TracingSink};
