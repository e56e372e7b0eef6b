//! Case registry - test cases, benchmark cases and hooks
//!
//! Bodies are boxed closures so they can capture the embedder's state. The
//! `'a` lifetime lets a suite borrow locals that outlive it.

use std::cmp::Ordering;
use std::fmt;

/// Body of a test case
pub type TestFn<'a> = Box<dyn FnMut() -> bool + 'a>;

/// Body of a benchmark case, or a hook
pub type UnitFn<'a> = Box<dyn FnMut() + 'a>;

/// A registered test: a description and a body returning pass/fail
///
/// Equality and ordering look at the description only, so two cases sharing
/// a description collapse into one entry of the failure summary.
pub struct TestCase<'a> {
    description: String,
    body: TestFn<'a>,
}

impl<'a> TestCase<'a> {
    pub fn new(description: impl Into<String>, body: impl FnMut() -> bool + 'a) -> Self {
        Self {
            description: description.into(),
            body: Box::new(body),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Invoke the body once
    pub fn run(&mut self) -> bool {
        (self.body)()
    }
}

impl PartialEq for TestCase<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
    }
}

impl Eq for TestCase<'_> {}

impl PartialOrd for TestCase<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TestCase<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.description.cmp(&other.description)
    }
}

impl fmt::Debug for TestCase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A registered benchmark: a description, an inner loop count and a body
pub struct BenchCase<'a> {
    description: String,
    repetitions: u64,
    body: UnitFn<'a>,
}

impl<'a> BenchCase<'a> {
    pub fn new(
        description: impl Into<String>,
        repetitions: u64,
        body: impl FnMut() + 'a,
    ) -> Self {
        Self {
            description: description.into(),
            repetitions,
            body: Box::new(body),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn repetitions(&self) -> u64 {
        self.repetitions
    }

    /// Invoke the body once
    pub fn run(&mut self) {
        (self.body)()
    }
}

impl fmt::Debug for BenchCase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchCase")
            .field("description", &self.description)
            .field("repetitions", &self.repetitions)
            .finish_non_exhaustive()
    }
}

/// Ordered list of test cases plus the four optional hooks
///
/// Registration order is the initial execution order. Assigning a hook
/// twice keeps the last one.
#[derive(Default)]
pub struct TestSuite<'a> {
    pub(crate) tests: Vec<TestCase<'a>>,
    pub(crate) before_all: Option<UnitFn<'a>>,
    pub(crate) after_all: Option<UnitFn<'a>>,
    pub(crate) before_each: Option<UnitFn<'a>>,
    pub(crate) after_each: Option<UnitFn<'a>>,
}

impl<'a> TestSuite<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a test case
    pub fn add_test(
        &mut self,
        description: impl Into<String>,
        body: impl FnMut() -> bool + 'a,
    ) -> &mut Self {
        self.tests.push(TestCase::new(description, body));
        self
    }

    /// Install the hook run once before the first case
    pub fn before(&mut self, hook: impl FnMut() + 'a) -> &mut Self {
        self.before_all = Some(Box::new(hook));
        self
    }

    /// Install the hook run once after the last case
    pub fn after(&mut self, hook: impl FnMut() + 'a) -> &mut Self {
        self.after_all = Some(Box::new(hook));
        self
    }

    /// Install the hook run before every case
    pub fn before_each(&mut self, hook: impl FnMut() + 'a) -> &mut Self {
        self.before_each = Some(Box::new(hook));
        self
    }

    /// Install the hook run after every case
    pub fn after_each(&mut self, hook: impl FnMut() + 'a) -> &mut Self {
        self.after_each = Some(Box::new(hook));
        self
    }

    pub fn cases(&self) -> &[TestCase<'a>] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl fmt::Debug for TestSuite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSuite")
            .field("tests", &self.tests)
            .field("before_all", &self.before_all.is_some())
            .field("after_all", &self.after_all.is_some())
            .field("before_each", &self.before_each.is_some())
            .field("after_each", &self.after_each.is_some())
            .finish()
    }
}

/// Ordered list of benchmark cases
#[derive(Default, Debug)]
pub struct BenchSuite<'a> {
    pub(crate) benches: Vec<BenchCase<'a>>,
}

impl<'a> BenchSuite<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a benchmark case
    pub fn add_benchmark(
        &mut self,
        description: impl Into<String>,
        repetitions: u64,
        body: impl FnMut() + 'a,
    ) -> &mut Self {
        self.benches
            .push(BenchCase::new(description, repetitions, body));
        self
    }

    pub fn cases(&self) -> &[BenchCase<'a>] {
        &self.benches
    }

    pub fn len(&self) -> usize {
        self.benches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_registration_preserves_order() {
        let mut suite = TestSuite::new();
        suite
            .add_test("b", || true)
            .add_test("a", || false)
            .add_test("b", || true);

        let names: Vec<_> = suite.cases().iter().map(|c| c.description()).collect();
        assert_eq!(names, vec!["b", "a", "b"]);
        assert_eq!(suite.len(), 3);
    }

    #[test]
    fn test_case_identity_is_description() {
        let a = TestCase::new("same", || true);
        let b = TestCase::new("same", || false);
        let c = TestCase::new("other", || true);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(c < a);
    }

    #[test]
    fn test_hook_reassignment_overwrites() {
        let first = Cell::new(0);
        let second = Cell::new(0);

        let mut suite = TestSuite::new();
        suite.before(|| first.set(first.get() + 1));
        suite.before(|| second.set(second.get() + 1));

        if let Some(hook) = suite.before_all.as_mut() {
            hook();
        }
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_case_body_captures_state() {
        let calls = Cell::new(0);
        let mut case = TestCase::new("counts", || {
            calls.set(calls.get() + 1);
            calls.get() < 2
        });

        assert!(case.run());
        assert!(!case.run());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_bench_registration() {
        let mut benches = BenchSuite::new();
        benches.add_benchmark("noop", 1000, || {});

        assert_eq!(benches.len(), 1);
        assert_eq!(benches.cases()[0].description(), "noop");
        assert_eq!(benches.cases()[0].repetitions(), 1000);
    }
}
