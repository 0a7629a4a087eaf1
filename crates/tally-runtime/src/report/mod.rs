//! Reporting boundary
//!
//! A finished suite is handed to a [`Reporter`] as a [`SuiteReport`]: the
//! title, the suite-wide totals and the ordered case-name → result stack.
//! Two reporters ship with the crate:
//! - [`ConsoleReporter`]: text block per case
//! - [`TreeReporter`]: JSON tree with status and percentage per node, for
//!   visual front ends

pub mod console;
pub mod tree;

pub use console::ConsoleReporter;
pub use tree::TreeReporter;

use crate::results::{percentage, CaseStack, SuiteResults};
use serde::Serialize;
use std::io;

/// Results tree of one suite run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteReport {
    pub title: String,
    pub suite_results: SuiteResults,
    pub stack: CaseStack,
}

impl SuiteReport {
    pub fn percentage(&self) -> u32 {
        self.suite_results.percentage()
    }

    pub fn has_failures(&self) -> bool {
        self.suite_results.fail > 0
    }
}

/// Renders a finished suite
pub trait Reporter {
    fn report(&mut self, report: &SuiteReport) -> io::Result<()>;
}

/// Discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _report: &SuiteReport) -> io::Result<()> {
        Ok(())
    }
}

/// Totals across several suite runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub suites: usize,
    pub failed_suites: usize,
    pub pass: usize,
    pub fail: usize,
}

impl Summary {
    pub fn aggregate<'a>(reports: impl IntoIterator<Item = &'a SuiteReport>) -> Self {
        reports.into_iter().fold(Summary::default(), |mut acc, report| {
            acc.suites += 1;
            acc.pass += report.suite_results.pass;
            acc.fail += report.suite_results.fail;
            if report.has_failures() {
                acc.failed_suites += 1;
            }
            acc
        })
    }

    pub fn percentage(&self) -> u32 {
        percentage(self.pass, self.fail)
    }
}
