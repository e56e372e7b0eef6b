//! Test engine - schedule, shuffle and execute test cases with hooks
//!
//! The suite itself is never reordered: a run builds a schedule of indices
//! into it, so the same suite can be run again with different options.

use crate::error::DryRunResult;
use crate::options::{help_text, Options};
use crate::reporter::Reporter;
use crate::suite::{TestCase, TestSuite, UnitFn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

/// How an engine invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every scheduled case was executed
    Completed,
    /// Nothing was registered, nothing was written
    Empty,
    /// The help flag short-circuited execution
    Help,
    /// The argument vector could not be parsed; a diagnostic was written
    InvalidArguments,
}

/// Outcome of one `run_tests` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestReport {
    pub status: RunStatus,
    /// Number of pass ticks
    pub passed: usize,
    /// Number of fail ticks
    pub failed: usize,
    /// Failing descriptions, sorted and deduplicated
    pub failures: Vec<String>,
}

impl TestReport {
    fn skipped(status: RunStatus) -> Self {
        Self {
            status,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }

    /// Total number of executed case slots
    pub fn executed(&self) -> usize {
        self.passed + self.failed
    }

    /// True unless a case failed or the arguments were rejected
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.status != RunStatus::InvalidArguments
    }
}

/// Run the suite against the program's argument vector, reporting to stdout
pub fn run_tests<S: AsRef<str>>(args: &[S], suite: &mut TestSuite<'_>) -> DryRunResult<TestReport> {
    let stdout = io::stdout();
    run_tests_to(args, suite, stdout.lock())
}

/// Run the suite against an argument vector, reporting to `out`
pub fn run_tests_to<S: AsRef<str>, W: Write>(
    args: &[S],
    suite: &mut TestSuite<'_>,
    out: W,
) -> DryRunResult<TestReport> {
    run_parsed(Options::parse(args), suite, out)
}

/// Run the suite with already-built options, reporting to `out`
pub fn run_tests_with<W: Write>(
    options: &Options,
    suite: &mut TestSuite<'_>,
    out: W,
) -> DryRunResult<TestReport> {
    run_parsed(Ok(options.clone()), suite, out)
}

fn run_parsed<W: Write>(
    parsed: DryRunResult<Options>,
    suite: &mut TestSuite<'_>,
    out: W,
) -> DryRunResult<TestReport> {
    if suite.is_empty() {
        debug!("no test cases registered");
        return Ok(TestReport::skipped(RunStatus::Empty));
    }

    // before-all runs ahead of option handling, so it also runs for -h
    invoke("before-all", &mut suite.before_all);

    let options = match parsed {
        Ok(options) => options,
        Err(err) if err.is_usage() => {
            let mut reporter = Reporter::new(out, false);
            reporter.usage_error(&err)?;
            return Ok(TestReport::skipped(RunStatus::InvalidArguments));
        }
        Err(err) => return Err(err),
    };

    let mut reporter = Reporter::new(out, options.colors);
    if options.help {
        reporter.text(&help_text())?;
        return Ok(TestReport::skipped(RunStatus::Help));
    }

    execute(&options, suite, &mut reporter)
}

fn execute<W: Write>(
    options: &Options,
    suite: &mut TestSuite<'_>,
    reporter: &mut Reporter<W>,
) -> DryRunResult<TestReport> {
    let mut schedule = build_schedule(suite.len(), options.passes());

    let seed = options.seed.unwrap_or_else(clock_seed);
    let mut rng = StdRng::seed_from_u64(seed);
    if !options.determinate {
        schedule.shuffle(&mut rng);
    }
    debug!(
        seed,
        slots = schedule.len(),
        determinate = options.determinate,
        "running test schedule"
    );

    let mut passed = 0;
    let mut failed: Vec<usize> = Vec::new();
    for index in schedule {
        if run_case(suite, index) {
            passed += 1;
            reporter.pass_tick()?;
        } else {
            failed.push(index);
            reporter.fail_tick()?;
        }
    }
    reporter.section_break()?;

    invoke("after-all", &mut suite.after_all);

    let failures = summarize(failed.iter().map(|&index| &suite.tests[index]));
    if !failures.is_empty() {
        reporter.failures(&failures)?;
    }
    reporter.section_break()?;

    Ok(TestReport {
        status: RunStatus::Completed,
        passed,
        failed: failed.len(),
        failures,
    })
}

/// `passes` back-to-back copies of `0..len`
fn build_schedule(len: usize, passes: usize) -> Vec<usize> {
    (0..passes).flat_map(|_| 0..len).collect()
}

/// Sort by description and drop repeats
fn summarize<'s, 'a: 's>(failed: impl Iterator<Item = &'s TestCase<'a>>) -> Vec<String> {
    let mut cases: Vec<&TestCase<'a>> = failed.collect();
    cases.sort();
    cases.dedup();
    cases
        .into_iter()
        .map(|case| case.description().to_string())
        .collect()
}

/// Run one scheduled slot: before-each, body, after-each
///
/// A panic anywhere in the slot fails the case. When before-each panics the
/// body is skipped; after-each still runs.
fn run_case(suite: &mut TestSuite<'_>, index: usize) -> bool {
    let prepared = catch(|| invoke("before-each", &mut suite.before_each)).is_some();

    let case = &mut suite.tests[index];
    trace!(description = case.description(), "running test case");
    let outcome = if prepared {
        catch(|| case.run()).unwrap_or(false)
    } else {
        false
    };
    if !outcome {
        debug!(description = case.description(), "test case failed");
    }

    let cleaned = catch(|| invoke("after-each", &mut suite.after_each)).is_some();
    outcome && cleaned
}

fn catch<T>(f: impl FnOnce() -> T) -> Option<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).ok()
}

fn invoke(name: &str, hook: &mut Option<UnitFn<'_>>) {
    if let Some(hook) = hook.as_mut() {
        trace!(hook = name, "invoking hook");
        hook();
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
