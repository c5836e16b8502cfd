//! Many threads timing at once produce whole, well-formed lines.

mod common;

use std::collections::{BTreeMap, BTreeSet};
use std::thread;

use common::{capture, records, serial};
use scopetimer_core::{scope_timer, thread_number};

const THREADS: usize = 8;
const TIMERS_PER_THREAD: usize = 200;

#[test]
fn concurrent_lines_never_interleave() {
    let _serial = serial();
    let captured = capture(&[("SCOPE_TIMER_FLUSH_N", "7")]);

    let numbers: BTreeSet<u32> = thread::scope(|s| {
        let workers: Vec<_> = (0..THREADS)
            .map(|worker| {
                s.spawn(move || {
                    for i in 0..TIMERS_PER_THREAD {
                        scope_timer!(format!("tests:worker:{worker}:{i}"));
                    }
                    thread_number()
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked"))
            .collect()
    });

    assert_eq!(numbers.len(), THREADS, "thread numbers must be unique");

    let records = records(&captured);
    assert_eq!(records.len(), THREADS * TIMERS_PER_THREAD);
    assert_eq!(captured.flush_count(), THREADS * TIMERS_PER_THREAD / 7);

    let mut per_tid: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for record in &records {
        assert!(numbers.contains(&record.tid), "unknown TID {}", record.tid);
        let index = record
            .label
            .rsplit(':')
            .next()
            .and_then(|i| i.parse().ok())
            .unwrap_or_else(|| panic!("unexpected label {}", record.label));
        per_tid.entry(record.tid).or_default().push(index);
    }

    // Each thread's own lines keep program order.
    for indices in per_tid.values() {
        let expected: Vec<usize> = (0..TIMERS_PER_THREAD).collect();
        assert_eq!(indices, &expected);
    }
}

#[test]
fn thread_numbers_are_stable_within_a_thread() {
    let first = thread_number();
    assert!(first >= 1);
    assert_eq!(thread_number(), first);

    let other = thread::spawn(thread_number)
        .join()
        .expect("worker panicked");
    assert_ne!(other, first);
}
