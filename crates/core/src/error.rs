use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Why a single extractor line could not be turned into a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected 4 space-separated fields")]
    MissingFields,
    #[error("address is not a decimal u64")]
    BadAddress,
    #[error("size is not a decimal u64")]
    BadSize,
    #[error("kind must be a single character")]
    BadKind,
    #[error("info field has more than one tab")]
    TooManyTabs,
    #[error("file:line suffix must contain exactly one colon")]
    BadFileLine,
    #[error("line number is not a decimal integer")]
    BadLineNumber,
}

/// Error type for everything between invoking the extractor and rendering.
///
/// Every variant is fatal for the run; callers are expected to surface it
/// and stop rather than emit a partial report.
#[derive(Debug, Error)]
pub enum SizeError {
    #[error("Binary not found at {0}")]
    MissingBinary(PathBuf),

    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed { tool: String, status: ExitStatus, stderr: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line_no}: {reason}: {line:?}")]
    Parse { line_no: usize, line: String, reason: ParseErrorKind },

    #[error("Config error: {0}")]
    Config(String),
}
