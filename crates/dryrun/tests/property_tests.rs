//! Property tests for the test engine's counting, ordering and colour laws

use dryrun::{run_tests_with, Options, TestSuite};
use proptest::prelude::*;
use std::cell::RefCell;

/// Cases as (description, outcome) pairs drawn from a small alphabet so
/// duplicate descriptions are common
fn cases() -> impl Strategy<Value = Vec<(String, bool)>> {
    prop::collection::vec(("[a-e]{1,2}", any::<bool>()), 1..12)
}

fn build<'a>(cases: &[(String, bool)], calls: &'a RefCell<Vec<usize>>) -> TestSuite<'a> {
    let mut suite = TestSuite::new();
    for (index, (description, outcome)) in cases.iter().enumerate() {
        let outcome = *outcome;
        suite.add_test(description.clone(), move || {
            calls.borrow_mut().push(index);
            outcome
        });
    }
    suite
}

fn render(options: &Options, suite: &mut TestSuite<'_>) -> (dryrun::TestReport, String) {
    let mut out = Vec::new();
    let report = run_tests_with(options, suite, &mut out).unwrap();
    (report, String::from_utf8(out).unwrap())
}

proptest! {
    #[test]
    fn tick_count_matches_schedule(cases in cases(), repeat in 0u32..5, seed in any::<u64>()) {
        let calls = RefCell::new(Vec::new());
        let mut suite = build(&cases, &calls);
        let options = Options::default().with_repeat(repeat).with_seed(seed);

        let (report, out) = render(&options, &mut suite);
        let ticks = out.chars().take_while(|c| *c == '.' || *c == 'F').count();
        let expected = repeat.max(1) as usize * cases.len();

        prop_assert_eq!(ticks, expected);
        prop_assert_eq!(report.executed(), expected);
    }

    #[test]
    fn every_case_runs_repeat_times(cases in cases(), repeat in 1u32..5, seed in any::<u64>()) {
        let calls = RefCell::new(Vec::new());
        let mut suite = build(&cases, &calls);
        let options = Options::default().with_repeat(repeat).with_seed(seed);

        render(&options, &mut suite);

        for index in 0..cases.len() {
            let runs = calls.borrow().iter().filter(|&&i| i == index).count();
            prop_assert_eq!(runs, repeat as usize);
        }
    }

    #[test]
    fn failure_summary_is_sorted_and_unique(cases in cases(), seed in any::<u64>()) {
        let calls = RefCell::new(Vec::new());
        let mut suite = build(&cases, &calls);

        let (report, _) = render(&Options::default().with_seed(seed), &mut suite);

        let mut expected: Vec<String> = cases
            .iter()
            .filter(|(_, outcome)| !outcome)
            .map(|(description, _)| description.clone())
            .collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(report.failures, expected);
    }

    #[test]
    fn determinate_runs_in_registration_order(cases in cases(), repeat in 0u32..4) {
        let calls = RefCell::new(Vec::new());
        let mut suite = build(&cases, &calls);
        let options = Options::default().with_determinate(true).with_repeat(repeat);

        render(&options, &mut suite);

        let expected: Vec<usize> = (0..repeat.max(1)).flat_map(|_| 0..cases.len()).collect();
        prop_assert_eq!(calls.borrow().clone(), expected);
    }

    #[test]
    fn plain_output_has_no_escapes(cases in cases(), seed in any::<u64>()) {
        let calls = RefCell::new(Vec::new());
        let mut suite = build(&cases, &calls);

        let (_, out) = render(&Options::default().with_seed(seed), &mut suite);

        prop_assert!(!out.as_bytes().contains(&0x1b));
    }
}
