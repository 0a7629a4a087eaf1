//! Suite errors

use crate::suite::{BodyError, Stage};
use thiserror::Error;

/// Errors raised by registration, execution and reporting
#[derive(Debug, Error)]
pub enum SuiteError {
    /// A registration call received a value that cannot be invoked
    #[error("{target} must be a function, got {type_name}")]
    InvalidCallback {
        target: String,
        type_name: &'static str,
    },

    /// A hook or test body returned an error; the rest of the run was skipped
    #[error("suite aborted in {stage}: {source}")]
    Aborted { stage: Stage, source: BodyError },

    /// `run` was called on a suite that already ran
    #[error("suite '{title}' has already run")]
    AlreadyRan { title: String },

    /// The reporter failed to write its output
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

/// Result type for suite operations
pub type SuiteResult<T> = Result<T, SuiteError>;
