//! Bundled sample suite
//!
//! Exercises every assertion, the lifecycle hooks and dynamic registration.
//! Several cases assert on the boolean another assertion returned.

use tally_runtime::{ExecutionMode, Suite, SuiteResult, Value};

pub const TITLE: &str = "Tally sample suite";

/// Build the sample suite. With `include_failing`, one extra case records
/// deliberate failures so the failure path of a reporter can be seen.
pub fn build(mode: ExecutionMode, include_failing: bool) -> SuiteResult<Suite> {
    let mut suite = Suite::new(TITLE, mode);

    suite
        .set_before(|t| {
            // Recorded under the suite scope: no case is current yet.
            t.pass("suite setup");
            Ok(())
        })
        .set_after_each(|t| {
            let in_case = t.current_case().is_some();
            t.assert_true(in_case, "afterEach runs inside a case");
            Ok(())
        });

    suite
        .test_case("Truthiness", |t| {
            t.assert_true(true, None);
            t.assert_true(1, "1 is true");
            t.assert_true("1", "\"1\" is true");
            t.assert_true(vec![1], "[1] is true");
            t.assert(true, "assert is an alias of assertTrue");
            t.assert_false(false, None);
            t.assert_false(0, "0 is false");
            t.assert_false("", "empty string is false");
            t.assert_false(Vec::<i32>::new(), "[] is false");
            Ok(())
        })
        .test_case("Coercive equality", |t| {
            t.assert_equals(0, "", "0 == \"\"");
            t.assert_equals(0, Value::Null, "0 == null");
            t.assert_equals(1, true, "1 == true");
            t.assert_equals("42", 42, "\"42\" == 42");
            t.assert_equals(vec![1, 2], "1,2", "[1,2] == \"1,2\"");
            t.assert_equals(Value::Null, Value::Undefined, "null == undefined");
            t.assert_not_equals(1, "one", "1 != \"one\"");
            t.assert_not_equals(Value::Null, "", "null != \"\"");
            t.assert_not_equals(0, Value::Undefined, "0 != undefined");
            Ok(())
        })
        .test_case("Strict equality", |t| {
            let list = Value::from(vec![1, 2, 3]);
            t.assert_same(1, 1.0, "1 === 1.0");
            t.assert_same("a", "a", "equal strings are the same");
            t.assert_same(list.clone(), list, "an array is itself");
            t.assert_not_same(0, "", "0 !== \"\"");
            t.assert_not_same(1, true, "1 !== true");
            t.assert_not_same(vec![1], vec![1], "distinct arrays are not the same");
            Ok(())
        })
        .test_case("Membership", |t| {
            t.assert_in_array("b", vec!["a", "b", "c"], None);
            t.assert_in_array(Value::Null, Value::array(vec![Value::from(1), Value::Null]), "null in [1, null]");
            t.assert_not_in_array(false, vec![0], "membership does not coerce");
            t.assert_not_in_array("1", vec![1], "\"1\" not in [1]");
            t.assert_not_in_array("x", Value::Null, "non-array haystack is empty");
            Ok(())
        })
        .test_case("Composed assertions", |t| {
            let loose = t.assert_equals(0, "", "0 == \"\"");
            t.assert_true(loose, "assertEquals returned true");

            let differs = t.assert_not_same(0, "", "0 !== \"\"");
            t.assert_same(differs, true, "assertNotSame returned true");

            let passed = t.pass("explicit pass");
            t.assert_true(passed, "pass returned true");

            let absent = t.assert_not_in_array(2, vec![1, 3], "2 not in [1, 3]");
            t.assert_equals(absent, 1, "assertNotInArray returned true");
            Ok(())
        })
        .test(|t| {
            t.record(true, "raw record");
            t.assert_same(t.current_case() == Some("Test Case #6"), true, "unnamed case is numbered");
            Ok(())
        });

    suite.register_value(
        Some("Dynamic registration"),
        Value::function(|t| {
            t.assert_equals(t.title() == TITLE, true, "body sees its suite");
            Ok(())
        }),
    )?;

    if include_failing {
        suite.test_case("Expected failures", |t| {
            t.fail("deliberate failure");
            t.assert_same(0, "", "0 === \"\"");
            t.assert_in_array(false, vec![0], "false in [0]");
            let failed = t.assert_equals(1, 2, "1 == 2");
            t.assert_false(failed, "assertEquals returned false");
            Ok(())
        });
    }

    Ok(suite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_runtime::{NullReporter, SUITE_SCOPE};

    fn run(include_failing: bool) -> tally_runtime::SuiteReport {
        build(ExecutionMode::Console, include_failing)
            .unwrap()
            .with_console_reporter(NullReporter)
            .run()
            .unwrap()
    }

    #[test]
    fn test_sample_passes() {
        let report = run(false);
        assert!(!report.has_failures());
        assert_eq!(report.percentage(), 100);
    }

    #[test]
    fn test_sample_case_order() {
        let report = run(false);
        let names: Vec<&str> = report.stack.names().collect();
        assert_eq!(
            names,
            vec![
                SUITE_SCOPE,
                "Truthiness",
                "Coercive equality",
                "Strict equality",
                "Membership",
                "Composed assertions",
                "Test Case #6",
                "Dynamic registration",
            ]
        );
    }

    #[test]
    fn test_failing_case_only_fails_where_intended() {
        let report = run(true);
        let failing = report.stack.get("Expected failures").unwrap();
        // four deliberate failures, the assertFalse on a returned false and
        // the afterEach check pass
        assert_eq!((failing.pass, failing.fail), (2, 4));
        assert_eq!(report.suite_results.fail, 4);
    }
}
