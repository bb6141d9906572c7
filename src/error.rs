use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("stop words file not found at {}", .0.display())]
    StopWordsNotFound(PathBuf),

    /// The optional collaborator was not detected at startup.
    #[error("{0} is not available on this system")]
    Unavailable(&'static str),

    #[error("{program} exited with {status}: {stderr}")]
    Collaborator {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("{program} produced invalid output: {reason}")]
    InvalidOutput { program: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
