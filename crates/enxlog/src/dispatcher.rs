use crate::error::LogError;
use crate::filter::FilterTree;
use crate::level::LogLevel;
use crate::logger::Logger;
use crate::sink::{EntryHeader, Sink};
use parking_lot::Mutex;
use std::cell::Cell;
use std::fmt;
use std::io;
use tracing::{debug, warn};

/// Routes records from loggers to sinks.
///
/// Holds the default level, the [`FilterTree`] and the sink list. Entries are
/// written under a single lock, so records from concurrent threads never
/// interleave within a sink.
pub struct Dispatcher {
    default_level: LogLevel,
    filter: FilterTree,
    sinks: Mutex<SinkSet>,
}

struct SinkSet {
    sinks: Vec<Box<dyn Sink>>,
    failed: Vec<bool>,
    active: bool,
}

impl Dispatcher {
    /// Returns a new [`DispatcherBuilder`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use enxlog::{ConsoleSink, Dispatcher, FilterTree, LogLevel};
    ///
    /// let dispatcher = Dispatcher::builder()
    ///     .default_level(LogLevel::Warn)
    ///     .filter(FilterTree::new().with("net", LogLevel::Debug))
    ///     .sink(ConsoleSink::stdout())
    ///     .build()?;
    ///
    /// assert!(dispatcher.enabled(&["net", "tcp"], LogLevel::Debug));
    /// assert!(!dispatcher.enabled(&["db"], LogLevel::Info));
    /// # Ok::<(), enxlog::LogError>(())
    /// ```
    #[must_use = "The builder must be configured before it can be used to build a dispatcher."]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    #[must_use]
    pub const fn default_level(&self) -> LogLevel {
        self.default_level
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterTree {
        &self.filter
    }

    /// Number of sinks, shut down or not.
    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.lock().sinks.len()
    }

    /// Effective level of the logger at `path`.
    #[must_use]
    pub fn level_for(&self, path: &[&str]) -> LogLevel {
        self.filter.resolve(path, self.default_level)
    }

    /// Whether a record at `level` from `path` would be emitted.
    #[must_use]
    pub fn enabled(&self, path: &[&str], level: LogLevel) -> bool {
        self.level_for(path).allows(level)
    }

    /// Emits one record through every sink, if enabled.
    ///
    /// A failing sink is reported through `tracing` and skipped for the rest of
    /// the entry; the other sinks are unaffected.
    ///
    /// Records logged while this thread is already emitting an entry (from a
    /// `Display` impl of an argument, say) are dropped with a warning.
    pub fn log(
        &self,
        logger: &Logger<'_>,
        level: LogLevel,
        module: &str,
        line: u32,
        args: fmt::Arguments<'_>,
    ) {
        let path = logger.path();
        if !self.enabled(path, level) {
            return;
        }

        let Some(_emitting) = Emitting::enter() else {
            warn!(logger = %logger, %level, module, line, "Nested record dropped");
            return;
        };

        let mut set = self.sinks.lock();
        if set.active {
            let header = EntryHeader::now(path, level, module, line);
            set.emit(&header, args);
        }
    }

    /// Shuts every sink down. Later records are dropped.
    pub fn shutdown(&self) {
        let mut set = self.sinks.lock();
        if !set.active {
            return;
        }
        set.active = false;
        for sink in &mut set.sinks {
            sink.shutdown();
        }
        debug!(sinks = set.sinks.len(), "Dispatcher shut down");
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.sinks.lock().active
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = self.sinks.lock();
        let names: Vec<&str> = set.sinks.iter().map(|s| s.name()).collect();
        f.debug_struct("Dispatcher")
            .field("default_level", &self.default_level)
            .field("filter", &self.filter)
            .field("sinks", &names)
            .field("active", &set.active)
            .finish()
    }
}

impl SinkSet {
    fn emit(&mut self, header: &EntryHeader<'_>, args: fmt::Arguments<'_>) {
        self.failed.clear();
        self.failed.resize(self.sinks.len(), false);

        for (sink, failed) in self.sinks.iter_mut().zip(self.failed.iter_mut()) {
            if let Err(e) = sink.open_entry(header) {
                report(&**sink, "open", &e);
                *failed = true;
            }
        }

        let mut fanout = Fanout { sinks: &mut self.sinks, failed: &mut self.failed };
        let _ = fmt::write(&mut fanout, args);

        for (sink, failed) in self.sinks.iter_mut().zip(self.failed.iter()) {
            if *failed {
                continue;
            }
            if let Err(e) = sink.close_entry() {
                report(&**sink, "close", &e);
            }
        }
    }
}

thread_local! {
    static EMITTING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as emitting an entry until dropped.
struct Emitting;

impl Emitting {
    fn enter() -> Option<Self> {
        EMITTING.with(|emitting| (!emitting.replace(true)).then_some(Self))
    }
}

impl Drop for Emitting {
    fn drop(&mut self) {
        EMITTING.with(|emitting| emitting.set(false));
    }
}

/// Streams formatter output to every healthy sink.
struct Fanout<'a> {
    sinks: &'a mut [Box<dyn Sink>],
    failed: &'a mut [bool],
}

impl fmt::Write for Fanout<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if s.is_empty() {
            return Ok(());
        }
        for (sink, failed) in self.sinks.iter_mut().zip(self.failed.iter_mut()) {
            if *failed {
                continue;
            }
            if let Err(e) = sink.write(s) {
                report(&**sink, "write", &e);
                *failed = true;
            }
        }
        Ok(())
    }
}

fn report(sink: &dyn Sink, stage: &'static str, error: &io::Error) {
    warn!(sink = sink.name(), stage, error = %error, "Sink failed, entry dropped for this sink");
}

/// A builder for configuring a [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    default_level: LogLevel,
    filter: FilterTree,
    sinks: Vec<Box<dyn Sink>>,
}

impl DispatcherBuilder {
    /// Level of loggers whose first path part has no filter entry.
    #[must_use = "The builder must be configured before it can be used to build a dispatcher."]
    pub const fn default_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }

    #[must_use = "The builder must be configured before it can be used to build a dispatcher."]
    pub fn filter(mut self, filter: FilterTree) -> Self {
        self.filter = filter;
        self
    }

    /// Appends a sink; sinks receive records in the order they were added.
    #[must_use = "The builder must be configured before it can be used to build a dispatcher."]
    pub fn sink(self, sink: impl Sink + 'static) -> Self {
        self.boxed_sink(Box::new(sink))
    }

    #[must_use = "The builder must be configured before it can be used to build a dispatcher."]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Initializes every sink, in order, and returns the dispatcher.
    ///
    /// # Errors
    /// Returns the first sink initialization error. Sinks initialized before
    /// the failing one are shut down again.
    pub fn build(self) -> Result<Dispatcher, LogError> {
        let mut sinks = self.sinks;

        for index in 0..sinks.len() {
            if let Err(e) = sinks[index].init() {
                warn!(sink = sinks[index].name(), error = %e, kind = e.kind(), "Sink initialization failed");
                for sink in sinks[..index].iter_mut().rev() {
                    sink.shutdown();
                }
                return Err(e);
            }
        }

        debug!(sinks = sinks.len(), default_level = %self.default_level, "Dispatcher ready");

        let failed = Vec::with_capacity(sinks.len());
        Ok(Dispatcher {
            default_level: self.default_level,
            filter: self.filter,
            sinks: Mutex::new(SinkSet { sinks, failed, active: true }),
        })
    }
}

impl fmt::Debug for DispatcherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.sinks.iter().map(|s| s.name()).collect();
        f.debug_struct("DispatcherBuilder")
            .field("default_level", &self.default_level)
            .field("filter", &self.filter)
            .field("sinks", &names)
            .finish()
    }
}
