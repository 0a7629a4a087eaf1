//! Tree reporter - structured output for visual front ends
//!
//! The report is written as a JSON tree: the suite node carries the
//! aggregate status and percentage, each case node its own, and each
//! assertion leaf its index, outcome and message.

use super::{Reporter, SuiteReport};
use crate::results::{CaseResult, Outcome};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
pub struct SuiteNode<'a> {
    pub title: &'a str,
    pub status: Outcome,
    pub percentage: u32,
    pub pass: usize,
    pub fail: usize,
    pub cases: Vec<CaseNode<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CaseNode<'a> {
    pub name: &'a str,
    pub status: Outcome,
    pub percentage: u32,
    pub pass: usize,
    pub fail: usize,
    pub assertions: Vec<AssertionLeaf<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AssertionLeaf<'a> {
    pub index: u64,
    pub outcome: Outcome,
    pub message: &'a str,
}

impl<'a> SuiteNode<'a> {
    pub fn build(report: &'a SuiteReport) -> Self {
        let totals = report.suite_results;
        SuiteNode {
            title: &report.title,
            status: totals.outcome(),
            percentage: totals.percentage(),
            pass: totals.pass,
            fail: totals.fail,
            cases: report
                .stack
                .iter()
                .map(|(name, case)| CaseNode::build(name, case))
                .collect(),
        }
    }
}

impl<'a> CaseNode<'a> {
    fn build(name: &'a str, case: &'a CaseResult) -> Self {
        CaseNode {
            name,
            status: case.outcome(),
            percentage: case.percentage(),
            pass: case.pass,
            fail: case.fail,
            assertions: case
                .records
                .iter()
                .map(|record| AssertionLeaf {
                    index: record.test_index,
                    outcome: record.outcome,
                    message: &record.message,
                })
                .collect(),
        }
    }
}

/// Writes the report as pretty-printed JSON
pub struct TreeReporter<W: Write> {
    out: W,
}

impl TreeReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TreeReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TreeReporter<W> {
    fn report(&mut self, report: &SuiteReport) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &SuiteNode::build(report))?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Recorder;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_tree_shape() {
        let mut recorder = Recorder::new();
        recorder.record("first", true, "a");
        recorder.record("second", false, "b");
        recorder.record("second", true, "c");
        let report = SuiteReport {
            title: "tree".to_string(),
            suite_results: recorder.totals(),
            stack: recorder.stack().clone(),
        };

        let mut reporter = TreeReporter::new(Vec::new());
        reporter.report(&report).unwrap();
        let written: serde_json::Value = serde_json::from_slice(&reporter.into_inner()).unwrap();

        assert_eq!(
            written,
            json!({
                "title": "tree",
                "status": "fail",
                "percentage": 67,
                "pass": 2,
                "fail": 1,
                "cases": [
                    {
                        "name": "first",
                        "status": "pass",
                        "percentage": 100,
                        "pass": 1,
                        "fail": 0,
                        "assertions": [
                            { "index": 1, "outcome": "pass", "message": "a" }
                        ]
                    },
                    {
                        "name": "second",
                        "status": "fail",
                        "percentage": 50,
                        "pass": 1,
                        "fail": 1,
                        "assertions": [
                            { "index": 2, "outcome": "fail", "message": "b" },
                            { "index": 3, "outcome": "pass", "message": "c" }
                        ]
                    }
                ]
            })
        );
    }
}
