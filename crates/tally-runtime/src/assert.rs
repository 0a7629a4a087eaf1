//! Assertion surface
//!
//! Every assertion is a predicate over [`Value`]s that records its outcome
//! on the suite and hands the outcome back, so assertions compose as
//! booleans:
//!
//! ```
//! # use tally_runtime::{ExecutionMode, Suite};
//! # use tally_runtime::report::NullReporter;
//! # let mut t = Suite::new("doc", ExecutionMode::Console).with_console_reporter(NullReporter);
//! let same = t.assert_same(1, 1, None);
//! t.assert_true(same, "assertions return their outcome");
//! ```
//!
//! # API
//!
//! ## Truthiness
//! - `assert_true(value, msg)` / `assert(value, msg)`: value loosely equals `true`
//! - `assert_false(value, msg)`: value loosely equals `false`
//!
//! ## Equality
//! - `assert_equals(a, b, msg)`: coercive equality (`0 == ""`)
//! - `assert_not_equals(a, b, msg)`
//! - `assert_same(a, b, msg)`: strict equality, no coercion
//! - `assert_not_same(a, b, msg)`
//!
//! ## Membership
//! - `assert_in_array(needle, haystack, msg)`: strict linear scan
//! - `assert_not_in_array(needle, haystack, msg)`
//!
//! ## Unconditional
//! - `pass(msg)` / `fail(msg)`
//!
//! Messages are optional: pass `None` to record the assertion's default label.

use crate::coerce::{loose_eq, strict_eq};
use crate::suite::Suite;
use crate::value::Value;

/// Kind of assertion, used for the default message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertKind {
    True,
    False,
    Equals,
    NotEquals,
    Same,
    NotSame,
    InArray,
    NotInArray,
    Pass,
    Fail,
}

impl AssertKind {
    /// Message recorded when the caller supplies none
    pub fn label(self) -> &'static str {
        match self {
            AssertKind::True => "Assert True",
            AssertKind::False => "Assert False",
            AssertKind::Equals => "Assert Equals",
            AssertKind::NotEquals => "Assert Not Equals",
            AssertKind::Same => "Assert Same",
            AssertKind::NotSame => "Assert Not Same",
            AssertKind::InArray => "Assert In Array",
            AssertKind::NotInArray => "Assert Not In Array",
            AssertKind::Pass => "Pass",
            AssertKind::Fail => "Fail",
        }
    }
}

/// Strict membership. Anything other than an array contains nothing.
fn contains(haystack: &Value, needle: &Value) -> bool {
    haystack
        .as_array()
        .map_or(false, |items| items.iter().any(|item| strict_eq(item, needle)))
}

impl Suite {
    fn check(&mut self, kind: AssertKind, outcome: bool, message: Option<&str>) -> bool {
        self.record_with(outcome, message.unwrap_or(kind.label()))
    }

    // ========================================================================
    // Truthiness
    // ========================================================================

    /// Passes when `value == true` under coercion (`true`, `1`, `"1"`, `[1]`).
    pub fn assert_true<'a>(
        &mut self,
        value: impl Into<Value>,
        message: impl Into<Option<&'a str>>,
    ) -> bool {
        let outcome = loose_eq(&value.into(), &Value::Bool(true));
        self.check(AssertKind::True, outcome, message.into())
    }

    /// Alias of [`Suite::assert_true`].
    pub fn assert<'a>(
        &mut self,
        value: impl Into<Value>,
        message: impl Into<Option<&'a str>>,
    ) -> bool {
        self.assert_true(value, message)
    }

    /// Passes when `value == false` under coercion (`false`, `0`, `""`, `[]`).
    pub fn assert_false<'a>(
        &mut self,
        value: impl Into<Value>,
        message: impl Into<Option<&'a str>>,
    ) -> bool {
        let outcome = loose_eq(&value.into(), &Value::Bool(false));
        self.check(AssertKind::False, outcome, message.into())
    }

    // ========================================================================
    // Equality
    // ========================================================================

    /// Coercive equality.
    pub fn assert_equals<'a>(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        message: impl Into<Option<&'a str>>,
    ) -> bool {
        let outcome = loose_eq(&actual.into(), &expected.into());
        self.check(AssertKind::Equals, outcome, message.into())
    }

    #[deprecated(note = "use `assert_equals`")]
    pub fn assert_equal<'a>(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        message: impl Into<Option<&'a str>>,
    ) -> bool {
        self.assert_equals(actual, expected, message)
    }

    /// Negated coercive equality.
    pub fn assert_not_equals<'a>(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        message: impl Into<Option<&'a str>>,
    ) -> bool {
        let outcome = !loose_eq(&actual.into(), &expected.into());
        self.check(AssertKind::NotEquals, outcome, message.into())
    }

    /// Strict equality: kinds must match, reference kinds must be the same
    /// allocation.
    pub fn assert_same<'a>(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        message: impl Into<Option<&'a str>>,
    ) -> bool {
        let outcome = strict_eq(&actual.into(), &expected.into());
        self.check(AssertKind::Same, outcome, message.into())
    }

    #[deprecated(note = "use `assert_same`")]
    pub fn assert_identical<'a>(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        message: impl Into<Option<&'a str>>,
    ) -> bool {
        self.assert_same(actual, expected, message)
    }

    /// Negated strict equality.
    pub fn assert_not_same<'a>(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        message: impl Into<Option<&'a str>>,
    ) -> bool {
        let outcome = !strict_eq(&actual.into(), &expected.into());
        self.check(AssertKind::NotSame, outcome, message.into())
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Passes when some element of `haystack` is strictly equal to `needle`.
    pub fn assert_in_array<'a>(
        &mut self,
        needle: impl Into<Value>,
        haystack: impl Into<Value>,
        message: impl Into<Option<&'a str>>,
    ) -> bool {
        let outcome = contains(&haystack.into(), &needle.into());
        self.check(AssertKind::InArray, outcome, message.into())
    }

    pub fn assert_not_in_array<'a>(
        &mut self,
        needle: impl Into<Value>,
        haystack: impl Into<Value>,
        message: impl Into<Option<&'a str>>,
    ) -> bool {
        let outcome = !contains(&haystack.into(), &needle.into());
        self.check(AssertKind::NotInArray, outcome, message.into())
    }

    // ========================================================================
    // Unconditional
    // ========================================================================

    pub fn pass<'a>(&mut self, message: impl Into<Option<&'a str>>) -> bool {
        self.check(AssertKind::Pass, true, message.into())
    }

    pub fn fail<'a>(&mut self, message: impl Into<Option<&'a str>>) -> bool {
        self.check(AssertKind::Fail, false, message.into())
    }
}
