//! Assertion bookkeeping
//!
//! The [`Recorder`] owns every counter a suite keeps: the ordered
//! case-name → [`CaseResult`] stack, the suite-wide [`SuiteResults`] totals
//! and the global sequence index handed to each [`AssertionRecord`].

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        self == Outcome::Pass
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded assertion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionRecord {
    pub message: String,
    pub outcome: Outcome,
    /// Global sequence index, starting at 1
    pub test_index: u64,
}

/// Assertions recorded under one case name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub records: Vec<AssertionRecord>,
    pub pass: usize,
    pub fail: usize,
}

impl CaseResult {
    pub fn total(&self) -> usize {
        self.pass + self.fail
    }

    pub fn percentage(&self) -> u32 {
        percentage(self.pass, self.fail)
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_bool(self.fail == 0)
    }
}

/// Suite-wide running totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteResults {
    pub pass: usize,
    pub fail: usize,
}

impl SuiteResults {
    pub fn total(&self) -> usize {
        self.pass + self.fail
    }

    pub fn percentage(&self) -> u32 {
        percentage(self.pass, self.fail)
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_bool(self.fail == 0)
    }

    fn tally(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Pass => self.pass += 1,
            Outcome::Fail => self.fail += 1,
        }
    }
}

/// `round(pass * 100 / max(pass + fail, 1))`
pub fn percentage(pass: usize, fail: usize) -> u32 {
    let total = (pass + fail).max(1);
    ((pass as f64 * 100.0) / total as f64).round() as u32
}

/// Case name → results, kept in first-recorded order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseStack {
    entries: Vec<(String, CaseResult)>,
}

impl CaseStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&CaseResult> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, result)| result)
    }

    /// Lazily create the entry for `name`.
    pub fn entry(&mut self, name: &str) -> &mut CaseResult {
        let pos = match self.entries.iter().position(|(key, _)| key == name) {
            Some(pos) => pos,
            None => {
                self.entries.push((name.to_string(), CaseResult::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CaseResult)> {
        self.entries.iter().map(|(name, result)| (name.as_str(), result))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CaseStack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, result) in &self.entries {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

/// Appends assertion records and keeps the counters consistent.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    stack: CaseStack,
    totals: SuiteResults,
    last_index: u64,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `passed` under `case` and hand it back unchanged.
    pub fn record(&mut self, case: &str, passed: bool, message: &str) -> bool {
        let outcome = Outcome::from_bool(passed);
        self.last_index += 1;

        let result = self.stack.entry(case);
        result.records.push(AssertionRecord {
            message: message.to_string(),
            outcome,
            test_index: self.last_index,
        });
        match outcome {
            Outcome::Pass => result.pass += 1,
            Outcome::Fail => result.fail += 1,
        }
        self.totals.tally(outcome);

        tracing::trace!(
            case,
            index = self.last_index,
            %outcome,
            message,
            "assertion recorded"
        );
        passed
    }

    pub fn stack(&self) -> &CaseStack {
        &self.stack
    }

    pub fn totals(&self) -> SuiteResults {
        self.totals
    }

    /// Number of assertions recorded so far (also the last index handed out).
    pub fn recorded(&self) -> u64 {
        self.last_index
    }
}
