use crate::dispatcher::Dispatcher;
use crate::error::LogError;
use crate::level::LogLevel;
use crate::logger::Logger;
use parking_lot::{RwLock, const_rwlock};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

static GLOBAL: RwLock<Option<Arc<Dispatcher>>> = const_rwlock(None);

/// Installs `dispatcher` as the target of the logging macros.
///
/// # Errors
/// Returns [`LogError::AlreadyInitialized`] if a dispatcher is already
/// installed; the rejected dispatcher is shut down.
pub fn init(dispatcher: Dispatcher) -> Result<(), LogError> {
    let mut slot = GLOBAL.write();
    if slot.is_some() {
        return Err(LogError::AlreadyInitialized {
            context: Some("call enxlog::shutdown() before installing another dispatcher".into()),
        });
    }
    debug!(sinks = dispatcher.sink_count(), "Global dispatcher installed");
    *slot = Some(Arc::new(dispatcher));
    Ok(())
}

/// Uninstalls the global dispatcher and shuts its sinks down.
///
/// Returns `false` if none was installed.
pub fn shutdown() -> bool {
    let previous = GLOBAL.write().take();
    previous.is_some_and(|dispatcher| {
        dispatcher.shutdown();
        true
    })
}

#[must_use]
pub fn is_initialized() -> bool {
    GLOBAL.read().is_some()
}

/// Whether a record at `level` from `logger` would reach the global dispatcher.
#[must_use]
pub fn enabled(logger: &Logger<'_>, level: LogLevel) -> bool {
    GLOBAL.read().as_ref().is_some_and(|d| d.enabled(logger.path(), level))
}

/// Sends one record to the global dispatcher. Used by the logging macros.
pub fn dispatch(
    logger: &Logger<'_>,
    level: LogLevel,
    module: &str,
    line: u32,
    args: fmt::Arguments<'_>,
) {
    let current = GLOBAL.read().clone();
    if let Some(dispatcher) = current {
        dispatcher.log(logger, level, module, line, args);
    }
}
