//! Example embedding program for the Dry Run harness
//!
//! Registers a few tests around a shared ring buffer, a before-each hook that
//! resets it and two benchmarks, then hands the argument vector to the
//! harness. Passing `--broken` (ignored by the harness itself) registers a
//! failing case so the failure summary and exit code can be observed.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::hint::black_box;
use std::rc::Rc;

const CAPACITY: usize = 4;

/// Fixed-capacity queue that drops its oldest entry when full
#[derive(Debug, Default)]
struct Ring {
    items: VecDeque<u32>,
}

impl Ring {
    fn push(&mut self, value: u32) {
        if self.items.len() == CAPACITY {
            self.items.pop_front();
        }
        self.items.push_back(value);
    }

    fn oldest(&self) -> Option<u32> {
        self.items.front().copied()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

dryrun::dry_run_main!(|tests, benches| {
    let ring = Rc::new(RefCell::new(Ring::default()));
    let broken = std::env::args().any(|arg| arg == "--broken");

    let fresh = Rc::clone(&ring);
    tests.before_each(move || *fresh.borrow_mut() = Ring::default());

    let r = Rc::clone(&ring);
    tests.add_test("new ring is empty", move || r.borrow().oldest().is_none());

    let r = Rc::clone(&ring);
    tests.add_test("push stores a value", move || {
        r.borrow_mut().push(7);
        r.borrow().oldest() == Some(7)
    });

    let r = Rc::clone(&ring);
    tests.add_test("overflow drops the oldest value", move || {
        let mut ring = r.borrow_mut();
        for value in 0..=CAPACITY as u32 {
            ring.push(value);
        }
        ring.len() == CAPACITY && ring.oldest() == Some(1)
    });

    if broken {
        let r = Rc::clone(&ring);
        tests.add_test("ring remembers everything", move || {
            let mut ring = r.borrow_mut();
            for value in 0..10 {
                ring.push(value);
            }
            ring.len() == 10
        });
    }

    let r = Rc::clone(&ring);
    benches.add_benchmark("ring push", 100_000, move || {
        r.borrow_mut().push(black_box(3));
    });
    benches.add_benchmark("sum 1..1000", 1_000, || {
        black_box((1..1000u64).sum::<u64>());
    });
});
