use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every condition that aborts a validation run.
///
/// Lines that fail validation are not errors; they are tallied by the
/// pipeline. The variants here end the run immediately and are reported
/// through the log sink with the id returned by [`ValidateError::message_id`].
#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("check the input URL parameter: {0:?}")]
    InvalidLocator(String),

    #[error("we don't handle {scheme} input URLs")]
    UnsupportedScheme { scheme: String },

    #[error(
        "cannot tell how to read {locator}; if this is a valid JSONL file, rename it \
         with the .jsonl (or .gz) extension or use the file type override (--file-type)"
    )]
    UnrecognizedType { locator: String },

    #[error("no input URL given and standard input is not piped")]
    NoPipe,

    #[error("failed to open {locator}: {reason}")]
    SourceOpen { locator: String, reason: String },

    #[error("failed to decompress gzip stream at line {line}: {source}")]
    Decompression { line: u64, source: io::Error },

    #[error("record validator failed at line {line}: {message}")]
    ValidatorFault { line: u64, message: String },

    #[error("failed to read line {line}: {source}")]
    Read { line: u64, source: io::Error },

    #[error("failed to load settings from {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl ValidateError {
    /// Stable numeric identifier attached to the log event for this error.
    pub fn message_id(&self) -> u32 {
        match self {
            ValidateError::InvalidLocator(_) => 3001,
            ValidateError::UnsupportedScheme { .. } => 3002,
            ValidateError::UnrecognizedType { .. } => 3003,
            ValidateError::NoPipe => 3004,
            ValidateError::SourceOpen { .. } => 3005,
            ValidateError::Decompression { .. } => 3006,
            ValidateError::ValidatorFault { .. } => 3007,
            ValidateError::Read { .. } => 3008,
            ValidateError::Config { .. } => 3009,
        }
    }

    /// True when no usable source could be resolved from the user's input,
    /// which is when the CLI follows the diagnostic with its help text.
    pub fn wants_usage(&self) -> bool {
        matches!(
            self,
            ValidateError::InvalidLocator(_)
                | ValidateError::UnrecognizedType { .. }
                | ValidateError::NoPipe
        )
    }
}
