//! symsize-core
//!
//! Core library for per-symbol size analysis of compiled binaries.
//!
//! Given one binary it groups code and read-only data symbols by source
//! file; given two it computes a symbol-level delta (added, deleted and
//! resized symbols) with totals.
//!
//! All substantive logic lives here so it is fully testable and reusable
//! from multiple frontends.

pub mod config;
pub mod diff;
pub mod error;
pub mod extract;
pub mod model;
pub mod parse;
pub mod report;

pub use error::{ParseErrorKind, SizeError};

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
