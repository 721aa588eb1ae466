pub mod fixtures;

use enxlog::{Dispatcher, FilterTree, LogError, LogLevel, declare_logger, log, log_debug, log_error, log_info, log_trace, log_warn};
use fixtures::*;
use serial_test::serial;
use std::cell::Cell;

declare_logger!(A_B_C, "a", "b", "c");
declare_logger!(A_B, "a", "b");
declare_logger!(THREE, "one", "two", "three");

fn install(default: LogLevel, filter: FilterTree) -> MemorySink {
    let memory = MemorySink::new();
    let dispatcher = Dispatcher::builder()
        .default_level(default)
        .filter(filter)
        .sink(memory.clone())
        .build()
        .expect("build should succeed");
    enxlog::init(dispatcher).expect("init should succeed");
    memory
}

#[test]
#[serial]
fn macros_route_through_global_dispatcher() {
    let memory = install(
        LogLevel::None,
        FilterTree::new().with("a.b.c", LogLevel::Debug).with("one.two.three", LogLevel::Debug),
    );

    log_error!(A_B, "intermediate stays silent");
    log_debug!(A_B_C, "c debug {}", 1);
    log_trace!(A_B_C, "c trace");
    log_info!(THREE, "three info");
    log_warn!(THREE, "three warn");
    log!(THREE, LogLevel::Debug, "three {}", "debug");

    assert!(enxlog::shutdown());
    assert_eq!(memory.messages(), ["c debug 1", "three info", "three warn", "three debug"]);
    assert_eq!(memory.shutdowns(), 1);
}

#[test]
#[serial]
fn init_twice_returns_already_initialized() {
    let _memory = install(LogLevel::Info, FilterTree::new());
    let rejected = MemorySink::new();

    let second = Dispatcher::builder().sink(rejected.clone()).build().expect("build should succeed");
    let err = enxlog::init(second).expect_err("second init should fail");

    assert!(matches!(err, LogError::AlreadyInitialized { .. }), "unexpected error: {err}");
    assert_eq!(rejected.shutdowns(), 1);
    assert!(enxlog::shutdown());
}

#[test]
#[serial]
fn shutdown_without_dispatcher_is_a_no_op() {
    assert!(!enxlog::is_initialized());
    assert!(!enxlog::shutdown());
    log_error!(A_B_C, "nobody listens");
}

#[test]
#[serial]
fn disabled_records_do_not_evaluate_arguments() {
    let memory = install(LogLevel::Warn, FilterTree::new());
    let evaluated = Cell::new(0);
    let count = || {
        evaluated.set(evaluated.get() + 1);
        evaluated.get()
    };

    log_debug!(A_B_C, "skipped {}", count());
    log_warn!(A_B_C, "kept {}", count());

    assert!(enxlog::shutdown());
    assert_eq!(evaluated.get(), 1);
    assert_eq!(memory.messages(), ["kept 1"]);
}

#[test]
#[serial]
fn enabled_reflects_global_filter() {
    let _memory = install(LogLevel::Error, FilterTree::new().with("a.b", LogLevel::Trace));

    assert!(enxlog::enabled(&A_B_C, LogLevel::Trace));
    assert!(!enxlog::enabled(&THREE, LogLevel::Warn));
    assert!(enxlog::enabled(&THREE, LogLevel::Error));

    assert!(enxlog::shutdown());
    assert!(!enxlog::enabled(&A_B_C, LogLevel::Error));
}

struct Noisy;

impl std::fmt::Display for Noisy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        log_info!(THREE, "inner");
        f.write_str("noisy")
    }
}

#[test]
#[serial]
fn macros_inside_display_do_not_block() {
    let memory = install(LogLevel::Info, FilterTree::new());

    let (done, finished) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        log_info!(THREE, "value {}", Noisy);
        let _ = done.send(());
    });

    finished
        .recv_timeout(std::time::Duration::from_secs(5))
        .expect("nested logging should not block");
    assert!(enxlog::shutdown());
    assert_eq!(memory.messages(), ["value noisy"]);
}
