use std::path::PathBuf;

use thiserror::Error;

/// The process-boundary error hierarchy. Nothing downstream of load is
/// retried; every variant here is fatal to the current run and maps to a
/// non-zero exit code in `main`. Interruption is deliberately not a variant
/// of this type: it is a graceful outcome, not a failure.
#[derive(Debug, Error)]
pub enum JsspError {
    #[error("bad argument: {0}")]
    Argument(String),

    #[error("could not read instance file '{path}': {reason}")]
    Input { path: PathBuf, reason: String },

    #[error("could not write '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl JsspError {
    pub fn input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        JsspError::Input { path: path.into(), reason: reason.into() }
    }

    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JsspError::Output { path: path.into(), source }
    }
}
