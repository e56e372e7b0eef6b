//! Benchmark engine - time each case over its repetition count

use crate::error::DryRunResult;
use crate::options::{help_text, Options};
use crate::reporter::Reporter;
use crate::runner::RunStatus;
use crate::suite::{BenchCase, BenchSuite};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::debug;

/// One row of the benchmark table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchSample {
    pub description: String,
    pub repetitions: u64,
    /// Wall time for all repetitions, loop overhead included
    pub elapsed: Duration,
}

/// Outcome of one `run_benchmarks` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchReport {
    pub status: RunStatus,
    /// One sample per case, in registration order
    pub samples: Vec<BenchSample>,
}

impl BenchReport {
    fn skipped(status: RunStatus) -> Self {
        Self {
            status,
            samples: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status != RunStatus::InvalidArguments
    }
}

/// Time every benchmark against the program's argument vector, reporting to stdout
pub fn run_benchmarks<S: AsRef<str>>(
    args: &[S],
    suite: &mut BenchSuite<'_>,
) -> DryRunResult<BenchReport> {
    let stdout = io::stdout();
    run_benchmarks_to(args, suite, stdout.lock())
}

/// Time every benchmark against an argument vector, reporting to `out`
pub fn run_benchmarks_to<S: AsRef<str>, W: Write>(
    args: &[S],
    suite: &mut BenchSuite<'_>,
    out: W,
) -> DryRunResult<BenchReport> {
    let options = match Options::parse(args) {
        Ok(options) => options,
        Err(err) if err.is_usage() => {
            let mut reporter = Reporter::new(out, false);
            reporter.usage_error(&err)?;
            return Ok(BenchReport::skipped(RunStatus::InvalidArguments));
        }
        Err(err) => return Err(err),
    };
    run_benchmarks_with(&options, suite, out)
}

/// Time every benchmark with already-built options, reporting to `out`
///
/// Only `colors` and `help` affect benchmarks.
pub fn run_benchmarks_with<W: Write>(
    options: &Options,
    suite: &mut BenchSuite<'_>,
    out: W,
) -> DryRunResult<BenchReport> {
    let mut reporter = Reporter::new(out, options.colors);
    if options.help {
        reporter.text(&help_text())?;
        return Ok(BenchReport::skipped(RunStatus::Help));
    }

    if suite.is_empty() {
        debug!("no benchmarks registered");
        return Ok(BenchReport::skipped(RunStatus::Empty));
    }

    reporter.bench_header()?;
    let mut samples = Vec::with_capacity(suite.len());
    for case in suite.benches.iter_mut() {
        let elapsed = time_case(case);
        debug!(
            description = case.description(),
            repetitions = case.repetitions(),
            elapsed_secs = elapsed.as_secs_f64(),
            "benchmark sampled"
        );
        reporter.bench_row(elapsed, case.repetitions(), case.description())?;
        samples.push(BenchSample {
            description: case.description().to_string(),
            repetitions: case.repetitions(),
            elapsed,
        });
    }
    reporter.section_break()?;

    Ok(BenchReport {
        status: RunStatus::Completed,
        samples,
    })
}

fn time_case(case: &mut BenchCase<'_>) -> Duration {
    let start = Instant::now();
    for _ in 0..case.repetitions() {
        case.run();
    }
    start.elapsed()
}
