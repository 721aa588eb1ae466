use enxlog_derive::enxlog_error;
use std::borrow::Cow;

#[enxlog_error]
pub enum SinkError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = SinkError::from("boom");
    assert_eq!(err.kind(), "Internal");
}
