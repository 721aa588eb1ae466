#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the enxlog crates.
//!
//! The only macro today is [`macro@enxlog_error`], which turns a plain enum into the
//! error type shape used across the workspace (`context` carrying variants, a
//! `...Ext` trait, `From` conversions and a `kind()` accessor).
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! enxlog-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining the error enums of the workspace.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and
///   for `Result<T, SourceError>` of every variant that wraps a source.
/// * `From<SourceError>` for variants with a `source` field (or a field marked
///   `#[source]`/`#[from]`).
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * `ErrorName::kind()` returning the variant name, handy as a structured
///   `tracing` field.
/// * A module-private `format_context` helper used inside `#[error(...)]`.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A `context` field must have the type `Option<Cow<'static, str>>`.
/// 3. Variants wrapping a source must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[enxlog_derive::enxlog_error]
/// pub enum SinkError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal sink error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn open(path: &str) -> Result<std::fs::File, SinkError> {
///     std::fs::File::open(path).context("Opening log file")
/// }
/// ```
#[proc_macro_attribute]
pub fn enxlog_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
