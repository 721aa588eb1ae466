use enxlog_derive::enxlog_error;
use std::borrow::Cow;
use std::io;

#[enxlog_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: io::Error, context: Option<Cow<'static, str>> },

    #[error("Unknown level{}: {name}", format_context(.context))]
    UnknownLevel { name: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn failing_io() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "missing"))
}

#[test]
fn enxlog_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/enxlog_error_pass.rs");
}

#[test]
fn source_results_gain_context() {
    let err = failing_io().context("Opening log file").unwrap_err();
    assert_eq!(err.kind(), "Io");
    assert_eq!(err.to_string(), "IO error (Opening log file): missing");
}

#[test]
fn question_mark_converts_sources() {
    fn run() -> Result<(), DemoError> {
        failing_io()?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert!(matches!(err, DemoError::Io { context: None, .. }));
    assert_eq!(err.to_string(), "IO error: missing");
}

#[test]
fn own_results_can_be_annotated() {
    let res: Result<(), DemoError> =
        Err(DemoError::UnknownLevel { name: "LOUD".to_owned(), context: None });
    let err = res.context("options.default_loglevel").unwrap_err();
    assert_eq!(err.to_string(), "Unknown level (options.default_loglevel): LOUD");
    assert_eq!(err.kind(), "UnknownLevel");
}

#[test]
fn internal_accepts_plain_strings() {
    let borrowed = DemoError::from("static message");
    let owned = DemoError::from(format!("owned {}", 1));
    assert_eq!(borrowed.to_string(), "Internal error: static message");
    assert_eq!(owned.to_string(), "Internal error: owned 1");
}
