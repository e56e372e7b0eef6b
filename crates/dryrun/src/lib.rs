//! Dry Run - a minimal embeddable test and benchmark harness
//!
//! An embedding program registers boolean test cases and timed benchmark
//! cases, then hands its argument vector to the engines:
//! - [`run_tests`] runs the test suite with optional hooks, repetition and
//!   shuffling, printing a tick per case and a failure summary;
//! - [`run_benchmarks`] times each benchmark over its repetition count and
//!   prints one table row per case.
//!
//! # Command line
//!
//! | Flag | Effect |
//! |---|---|
//! | `-d` | keep registration order (no shuffling) |
//! | `-r N` | run the whole test list N times |
//! | `-c` | ANSI colours |
//! | `-h`, `--help` | print help and skip the engine |
//!
//! # Example
//!
//! ```no_run
//! use dryrun::{BenchSuite, TestSuite};
//! use std::process::ExitCode;
//!
//! fn main() -> ExitCode {
//!     let mut tests = TestSuite::new();
//!     tests.add_test("addition works", || 1 + 1 == 2);
//!
//!     let mut benches = BenchSuite::new();
//!     benches.add_benchmark("sum 1..100", 1000, || {
//!         std::hint::black_box((1..100u64).sum::<u64>());
//!     });
//!
//!     let args: Vec<String> = std::env::args().collect();
//!     dryrun::run_all(&args, &mut tests, &mut benches)
//! }
//! ```

pub mod bench;
pub mod error;
pub mod options;
pub mod reporter;
pub mod runner;
pub mod suite;

use std::process::ExitCode;

pub use bench::{
    run_benchmarks, run_benchmarks_to, run_benchmarks_with, BenchReport, BenchSample,
};
pub use error::{DryRunError, DryRunResult};
pub use options::{help_text, Options, VERSION};
pub use reporter::{Palette, Reporter};
pub use runner::{run_tests, run_tests_to, run_tests_with, RunStatus, TestReport};
pub use suite::{BenchCase, BenchSuite, TestCase, TestSuite};

/// Run the test engine, then the benchmark engine, on standard output
///
/// Fails when any case failed, the arguments were rejected, or standard
/// output could not be written.
pub fn run_all<S: AsRef<str>>(
    args: &[S],
    tests: &mut TestSuite<'_>,
    benches: &mut BenchSuite<'_>,
) -> ExitCode {
    let tests_ok = matches!(run_tests(args, tests), Ok(report) if report.is_success());
    let benches_ok = matches!(run_benchmarks(args, benches), Ok(report) if report.is_success());

    if tests_ok && benches_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Generate a `main` that registers cases and runs both engines
///
/// The suites outlive the block, so closures must own what they capture.
///
/// ```no_run
/// dryrun::dry_run_main!(|tests, benches| {
///     tests.add_test("truth", || true);
///     benches.add_benchmark("noop", 1000, || {});
/// });
/// ```
#[macro_export]
macro_rules! dry_run_main {
    (|$tests:ident, $benches:ident| $body:block) => {
        fn main() -> ::std::process::ExitCode {
            let mut $tests = $crate::TestSuite::new();
            let mut $benches = $crate::BenchSuite::new();
            $body
            let args: ::std::vec::Vec<::std::string::String> = ::std::env::args().collect();
            $crate::run_all(&args, &mut $tests, &mut $benches)
        }
    };
}
