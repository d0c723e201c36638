//! Failure conditions that abort a run before or during generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors with a user-facing meaning
///
/// I/O failures while writing the project are reported as plain
/// [`anyhow::Error`]s with path context; external process failures are
/// never errors at all.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("{} is a file.", name_of(.0))]
    IsFile(PathBuf),

    #[error("{} is not writable.", name_of(.0))]
    NotWritable(PathBuf),

    #[error("{} is not readable.", name_of(.0))]
    NotReadable(PathBuf),

    #[error("No destination path given.")]
    EmptyDestination,

    #[error("Invalid SDK endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Headless run against a directory that already exists
    #[error("Targeted directory `{}` already exists.", .0.display())]
    DestinationExists(PathBuf),

    /// The operator answered the overwrite confirmation with something other than yes
    #[error("Setup cancelled.")]
    Declined,

    #[error("Unexpected end of input while reading: {0}")]
    EndOfInput(String),
}

impl ScaffoldError {
    /// Whether the error should be printed before exiting
    ///
    /// A declined confirmation exits silently; the prompt was the message.
    pub fn is_silent(&self) -> bool {
        matches!(self, ScaffoldError::Declined)
    }
}

fn name_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
