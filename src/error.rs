//! Error types shared by every benchmark strategy

use std::process::ExitCode;

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BenchError>;

/// Everything that can abort a benchmark run.
///
/// None of these are retried: a run either completes with the requested
/// configuration or stops at the first failure.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Missing, malformed or non-positive command-line input
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A plan, descriptor or execution call reported failure
    #[error("{step} failed: {message}")]
    Backend {
        step: &'static str,
        message: String,
    },

    /// The signal buffer could not be allocated
    #[error("cannot allocate a signal buffer of {batch} x {length} samples")]
    Allocation { batch: usize, length: usize },
}

impl BenchError {
    pub(crate) fn backend(step: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Backend {
            step,
            message: message.to_string(),
        }
    }

    /// Numeric exit status reported for this error
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Configuration(_) => 1,
            Self::Backend { .. } => 2,
            Self::Allocation { .. } => 3,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Runs a backend call and names the step when it fails.
///
/// Every status coming out of the transform layer goes through here, so the
/// first failure aborts the run with a diagnostic that says where it happened.
pub(crate) fn check<T, E: std::fmt::Display>(
    step: &'static str,
    status: std::result::Result<T, E>,
) -> Result<T> {
    status.map_err(|e| BenchError::backend(step, e))
}
