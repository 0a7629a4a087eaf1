//! Suite runtime
//!
//! A [`Suite`] owns its registered test cases, the four optional lifecycle
//! hooks and the [`Recorder`] all assertions write to. `run` drives them in a
//! single call stack:
//!
//! ```text
//! before → (before_each → case → after_each)* → after → report
//! ```
//!
//! Every hook and body receives the suite itself, so bodies call the
//! assertion helpers on the argument they are handed.
//!
//! # Example
//!
//! ```
//! use tally_runtime::{ExecutionMode, Suite};
//! use tally_runtime::report::NullReporter;
//!
//! let mut suite = Suite::new("math", ExecutionMode::Console).with_console_reporter(NullReporter);
//! suite.test_case("adds", |t| {
//!     t.assert_equals(1 + 1, 2, None);
//!     Ok(())
//! });
//! let report = suite.run().unwrap();
//! assert_eq!(report.suite_results.pass, 1);
//! ```

use crate::error::{SuiteError, SuiteResult};
use crate::report::{ConsoleReporter, Reporter, SuiteReport, TreeReporter};
use crate::results::{CaseResult, CaseStack, Recorder, SuiteResults};
use crate::value::{Callback, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Error type a hook or body may return
pub type BodyError = Box<dyn std::error::Error + 'static>;

/// Return type of every hook and body
pub type BodyResult = Result<(), BodyError>;

/// Case name assertions are recorded under while no case is running
pub const SUITE_SCOPE: &str = "(suite)";

/// Which reporter `report` dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Interactive text output
    #[default]
    Console,
    /// Structured tree for a visual front end
    Graphical,
}

impl ExecutionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionMode::Console => "console",
            ExecutionMode::Graphical => "graphical",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "console" => Ok(ExecutionMode::Console),
            "graphical" => Ok(ExecutionMode::Graphical),
            other => Err(format!(
                "unknown execution mode '{}' (expected 'console' or 'graphical')",
                other
            )),
        }
    }
}

/// The four lifecycle hook slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Before,
    After,
    BeforeEach,
    AfterEach,
}

impl HookKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HookKind::Before => "before",
            HookKind::After => "after",
            HookKind::BeforeEach => "beforeEach",
            HookKind::AfterEach => "afterEach",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in the run a hook or body was executing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Before,
    BeforeEach(String),
    Case(String),
    AfterEach(String),
    After,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Before => write!(f, "before hook"),
            Stage::BeforeEach(case) => write!(f, "beforeEach hook of '{}'", case),
            Stage::Case(case) => write!(f, "test case '{}'", case),
            Stage::AfterEach(case) => write!(f, "afterEach hook of '{}'", case),
            Stage::After => write!(f, "after hook"),
        }
    }
}

/// A registered test case
#[derive(Debug, Clone)]
pub struct TestCase {
    name: String,
    body: Callback,
}

impl TestCase {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &Callback {
        &self.body
    }
}

#[derive(Debug, Default, Clone)]
struct Hooks {
    before: Option<Callback>,
    after: Option<Callback>,
    before_each: Option<Callback>,
    after_each: Option<Callback>,
}

impl Hooks {
    fn slot(&mut self, kind: HookKind) -> &mut Option<Callback> {
        match kind {
            HookKind::Before => &mut self.before,
            HookKind::After => &mut self.after,
            HookKind::BeforeEach => &mut self.before_each,
            HookKind::AfterEach => &mut self.after_each,
        }
    }
}

/// Accept `value` only if it can be invoked.
fn callable(target: impl Into<String>, value: Value) -> SuiteResult<Callback> {
    match value {
        Value::Function(callback) => Ok(callback),
        other => Err(SuiteError::InvalidCallback {
            target: target.into(),
            type_name: other.type_name(),
        }),
    }
}

/// A titled collection of test cases and hooks
pub struct Suite {
    title: String,
    mode: ExecutionMode,
    cases: Vec<TestCase>,
    hooks: Hooks,
    current: Option<String>,
    recorder: Recorder,
    console: Box<dyn Reporter>,
    graphical: Box<dyn Reporter>,
    ran: bool,
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("title", &self.title)
            .field("mode", &self.mode)
            .field("cases", &self.cases.len())
            .field("current", &self.current)
            .field("results", &self.recorder.totals())
            .field("ran", &self.ran)
            .finish()
    }
}

impl Suite {
    /// Create a suite reporting to stdout in the given mode
    pub fn new(title: impl Into<String>, mode: ExecutionMode) -> Self {
        Self {
            title: title.into(),
            mode,
            cases: Vec::new(),
            hooks: Hooks::default(),
            current: None,
            recorder: Recorder::new(),
            console: Box::new(ConsoleReporter::stdout()),
            graphical: Box::new(TreeReporter::stdout()),
            ran: false,
        }
    }

    /// Replace the reporter used in [`ExecutionMode::Console`]
    pub fn with_console_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.console = Box::new(reporter);
        self
    }

    /// Replace the reporter used in [`ExecutionMode::Graphical`]
    pub fn with_graphical_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.graphical = Box::new(reporter);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Name of the case whose hooks or body are executing
    pub fn current_case(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn results(&self) -> SuiteResults {
        self.recorder.totals()
    }

    pub fn stack(&self) -> &CaseStack {
        self.recorder.stack()
    }

    pub fn case_result(&self, name: &str) -> Option<&CaseResult> {
        self.recorder.stack().get(name)
    }

    pub fn has_run(&self) -> bool {
        self.ran
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    fn next_case_name(&self) -> String {
        format!("Test Case #{}", self.cases.len() + 1)
    }

    fn push_case(&mut self, name: String, body: Callback) -> &mut Self {
        debug!(suite = %self.title, case = %name, "registered test case");
        self.cases.push(TestCase { name, body });
        self
    }

    /// Register a named test case
    pub fn test_case(
        &mut self,
        name: impl Into<String>,
        body: impl Fn(&mut Suite) -> BodyResult + 'static,
    ) -> &mut Self {
        self.push_case(name.into(), Callback::new(body))
    }

    /// Register a test case named `Test Case #<n>`
    pub fn test(&mut self, body: impl Fn(&mut Suite) -> BodyResult + 'static) -> &mut Self {
        let name = self.next_case_name();
        self.push_case(name, Callback::new(body))
    }

    /// Register a dynamically-typed body. Fails unless `body` is a function.
    pub fn register_value(&mut self, name: Option<&str>, body: Value) -> SuiteResult<&mut Self> {
        let name = name.map_or_else(|| self.next_case_name(), str::to_string);
        let body = callable(format!("body of test case '{}'", name), body)?;
        Ok(self.push_case(name, body))
    }

    fn set_hook(&mut self, kind: HookKind, hook: Callback) -> &mut Self {
        debug!(suite = %self.title, %kind, "hook set");
        *self.hooks.slot(kind) = Some(hook);
        self
    }

    /// Run once before any case. Replaces a previous `before` hook.
    pub fn set_before(&mut self, hook: impl Fn(&mut Suite) -> BodyResult + 'static) -> &mut Self {
        self.set_hook(HookKind::Before, Callback::new(hook))
    }

    /// Run once after every case. Replaces a previous `after` hook.
    pub fn set_after(&mut self, hook: impl Fn(&mut Suite) -> BodyResult + 'static) -> &mut Self {
        self.set_hook(HookKind::After, Callback::new(hook))
    }

    /// Run before each case. Replaces a previous `before_each` hook.
    pub fn set_before_each(
        &mut self,
        hook: impl Fn(&mut Suite) -> BodyResult + 'static,
    ) -> &mut Self {
        self.set_hook(HookKind::BeforeEach, Callback::new(hook))
    }

    /// Run after each case. Replaces a previous `after_each` hook.
    pub fn set_after_each(
        &mut self,
        hook: impl Fn(&mut Suite) -> BodyResult + 'static,
    ) -> &mut Self {
        self.set_hook(HookKind::AfterEach, Callback::new(hook))
    }

    /// Set a hook from a dynamically-typed value. Fails unless it is a function.
    pub fn set_hook_value(&mut self, kind: HookKind, hook: Value) -> SuiteResult<&mut Self> {
        let hook = callable(format!("{} hook", kind), hook)?;
        Ok(self.set_hook(kind, hook))
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Execute every hook and case in order, then report.
    ///
    /// The first hook or body error aborts the run and is returned as
    /// [`SuiteError::Aborted`]; nothing is reported in that case.
    pub fn run(&mut self) -> SuiteResult<SuiteReport> {
        if self.ran {
            return Err(SuiteError::AlreadyRan {
                title: self.title.clone(),
            });
        }
        self.ran = true;
        debug!(suite = %self.title, cases = self.cases.len(), mode = %self.mode, "running suite");

        let hooks = self.hooks.clone();
        if let Some(hook) = &hooks.before {
            self.invoke(hook, Stage::Before)?;
        }

        let cases = self.cases.clone();
        for case in &cases {
            self.current = Some(case.name.clone());
            if let Some(hook) = &hooks.before_each {
                self.invoke(hook, Stage::BeforeEach(case.name.clone()))?;
            }
            self.invoke(&case.body, Stage::Case(case.name.clone()))?;
            if let Some(hook) = &hooks.after_each {
                self.invoke(hook, Stage::AfterEach(case.name.clone()))?;
            }
            self.current = None;
        }

        if let Some(hook) = &hooks.after {
            self.invoke(hook, Stage::After)?;
        }

        self.report()?;
        Ok(self.snapshot())
    }

    fn invoke(&mut self, callback: &Callback, stage: Stage) -> SuiteResult<()> {
        debug!(suite = %self.title, %stage, "entering");
        match callback.call(self) {
            Ok(()) => Ok(()),
            Err(source) => {
                warn!(suite = %self.title, %stage, error = %source, "aborting suite");
                // Nothing runs after an abort; later records go to the suite scope.
                self.current = None;
                Err(SuiteError::Aborted { stage, source })
            }
        }
    }

    /// Hand the current results to the reporter selected by the mode.
    pub fn report(&mut self) -> SuiteResult<()> {
        let report = self.snapshot();
        let reporter = match self.mode {
            ExecutionMode::Console => &mut self.console,
            ExecutionMode::Graphical => &mut self.graphical,
        };
        reporter.report(&report)?;
        Ok(())
    }

    /// Copy of the results tree as it stands now
    pub fn snapshot(&self) -> SuiteReport {
        SuiteReport {
            title: self.title.clone(),
            suite_results: self.recorder.totals(),
            stack: self.recorder.stack().clone(),
        }
    }

    // ------------------------------------------------------------------
    // Recording
    // ------------------------------------------------------------------

    /// Record a raw outcome under the current case and return it.
    pub fn record<'a>(&mut self, outcome: bool, message: impl Into<Option<&'a str>>) -> bool {
        self.record_with(outcome, message.into().unwrap_or("Assertion"))
    }

    pub(crate) fn record_with(&mut self, outcome: bool, message: &str) -> bool {
        let case = self.current.as_deref().unwrap_or(SUITE_SCOPE);
        self.recorder.record(case, outcome, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullReporter;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn quiet(title: &str) -> Suite {
        Suite::new(title, ExecutionMode::Console)
            .with_console_reporter(NullReporter)
            .with_graphical_reporter(NullReporter)
    }

    #[test]
    fn test_generated_names_count_registrations() {
        let mut suite = quiet("names");
        suite.test(|_| Ok(())).test_case("named", |_| Ok(())).test(|_| Ok(()));

        let names: Vec<&str> = suite.cases().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Test Case #1", "named", "Test Case #3"]);
    }

    #[test]
    fn test_register_value_rejects_non_functions() {
        let mut suite = quiet("guard");
        let err = suite
            .register_value(Some("bad"), Value::from(42))
            .unwrap_err();
        assert!(matches!(
            err,
            SuiteError::InvalidCallback { type_name: "number", .. }
        ));
        assert!(err.to_string().contains("'bad'"), "msg: {}", err);
        assert!(suite.cases().is_empty());
    }

    #[test]
    fn test_register_value_generates_name() {
        let mut suite = quiet("guard");
        suite
            .register_value(None, Value::function(|_| Ok(())))
            .unwrap();
        assert_eq!(suite.cases()[0].name(), "Test Case #1");
    }

    #[test]
    fn test_set_hook_value_rejects_non_functions() {
        let mut suite = quiet("guard");
        let err = suite
            .set_hook_value(HookKind::AfterEach, Value::from("later"))
            .unwrap_err();
        assert_eq!(err.to_string(), "afterEach hook must be a function, got string");
    }

    #[test]
    fn test_later_hook_replaces_earlier() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut suite = quiet("hooks");

        let first = Rc::clone(&log);
        suite.set_before(move |_| {
            first.borrow_mut().push("first");
            Ok(())
        });
        let second = Rc::clone(&log);
        suite.set_before(move |_| {
            second.borrow_mut().push("second");
            Ok(())
        });
        suite.run().unwrap();

        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn test_current_case_tracks_hooks_and_body() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut suite = quiet("current");

        let s = Rc::clone(&seen);
        suite.set_before(move |t| {
            s.borrow_mut().push(t.current_case().map(str::to_string));
            Ok(())
        });
        let s = Rc::clone(&seen);
        suite.set_before_each(move |t| {
            s.borrow_mut().push(t.current_case().map(str::to_string));
            Ok(())
        });
        let s = Rc::clone(&seen);
        suite.test_case("only", move |t| {
            s.borrow_mut().push(t.current_case().map(str::to_string));
            Ok(())
        });
        suite.run().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![None, Some("only".to_string()), Some("only".to_string())]
        );
        assert_eq!(suite.current_case(), None);
    }

    #[test]
    fn test_record_outside_case_uses_suite_scope() {
        let mut suite = quiet("scope");
        suite.set_after(|t| {
            t.record(true, None);
            Ok(())
        });
        suite.run().unwrap();

        let scoped = suite.case_result(SUITE_SCOPE).unwrap();
        assert_eq!(scoped.pass, 1);
        assert_eq!(scoped.records[0].message, "Assertion");
    }

    #[test]
    fn test_abort_clears_current_case() {
        let mut suite = quiet("abort");
        suite.test_case("first", |t| {
            t.pass(None);
            Err("stop".into())
        });

        assert!(suite.run().is_err());
        assert_eq!(suite.current_case(), None);

        suite.record(true, None);
        assert_eq!(suite.case_result("first").unwrap().total(), 1);
        assert_eq!(suite.case_result(SUITE_SCOPE).unwrap().total(), 1);
    }

    #[test]
    fn test_second_run_is_rejected() {
        let mut suite = quiet("twice");
        suite.test(|t| {
            t.record(true, "once");
            Ok(())
        });
        suite.run().unwrap();

        let err = suite.run().unwrap_err();
        assert!(matches!(err, SuiteError::AlreadyRan { .. }));
        assert_eq!(suite.results().total(), 1);
    }

    #[test]
    fn test_execution_mode_parse() {
        assert_eq!("console".parse::<ExecutionMode>(), Ok(ExecutionMode::Console));
        assert_eq!("Graphical".parse::<ExecutionMode>(), Ok(ExecutionMode::Graphical));
        assert!("dom".parse::<ExecutionMode>().is_err());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Before.to_string(), "before hook");
        assert_eq!(
            Stage::AfterEach("x".into()).to_string(),
            "afterEach hook of 'x'"
        );
        assert_eq!(Stage::Case("x".into()).to_string(), "test case 'x'");
    }
}
