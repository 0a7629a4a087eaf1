//! Tally Runtime - sequential test suites with recorded assertions
//!
//! This library provides:
//! - A suite runtime running `before`/`before_each`/case/`after_each`/`after`
//!   in registration order
//! - An assertion surface with coercive and strict equality
//! - A recorder keeping per-case and suite-wide pass/fail counts
//! - Console and tree reporters for the finished results

/// Tally runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod assert;
pub mod coerce;
pub mod error;
pub mod report;
pub mod results;
pub mod suite;
pub mod value;

// Re-export commonly used types
pub use assert::AssertKind;
pub use error::{SuiteError, SuiteResult};
pub use report::{ConsoleReporter, NullReporter, Reporter, Summary, SuiteReport, TreeReporter};
pub use results::{AssertionRecord, CaseResult, CaseStack, Outcome, Recorder, SuiteResults};
pub use suite::{
    BodyError, BodyResult, ExecutionMode, HookKind, Stage, Suite, TestCase, SUITE_SCOPE,
};
pub use value::{Callback, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke() {
        assert_eq!(VERSION, "0.1.0");
    }
}
