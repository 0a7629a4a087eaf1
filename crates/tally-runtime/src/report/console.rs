//! Console reporter - one text block per case

use super::{Reporter, SuiteReport};
use colored::{ColoredString, Colorize};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Writes a text block per case listing each assertion's outcome and
/// sequence index, then a totals line.
pub struct ConsoleReporter<W: Write> {
    out: W,
    /// Disable colored output
    no_color: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            no_color: false,
        }
    }

    /// Disable colored output
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.no_color {
            text.to_string()
        } else {
            style(text).to_string()
        }
    }

    /// Render the whole report as text
    pub fn render(&self, report: &SuiteReport) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "{}", self.paint(&report.title, |s| s.bold()));
        let _ = writeln!(text);

        if report.stack.is_empty() {
            let _ = writeln!(text, "  {}", self.paint("no assertions recorded", |s| s.dimmed()));
            let _ = writeln!(text);
        }

        for (name, case) in report.stack.iter() {
            let _ = writeln!(
                text,
                "  {} ({} passed, {} failed)",
                self.paint(name, |s| s.bold()),
                case.pass,
                case.fail
            );
            for record in &case.records {
                let tag = if record.outcome.is_pass() {
                    self.paint("PASS", |s| s.green().bold())
                } else {
                    self.paint("FAIL", |s| s.red().bold())
                };
                let _ = writeln!(text, "    {} #{} {}", tag, record.test_index, record.message);
            }
            let _ = writeln!(text);
        }

        let totals = report.suite_results;
        let status = if totals.fail > 0 {
            self.paint("FAILED", |s| s.red().bold())
        } else {
            self.paint("PASSED", |s| s.green().bold())
        };
        let _ = writeln!(text, "{}", "─".repeat(50));
        let _ = writeln!(
            text,
            "Result: {} | {} total, {} passed, {} failed ({}%)",
            status,
            totals.total(),
            totals.pass,
            totals.fail,
            totals.percentage()
        );
        text
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, report: &SuiteReport) -> io::Result<()> {
        let text = self.render(report);
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}
