//! Small per-thread numbers for log lines.
//!
//! The first thread that asks gets 1, the next 2, and so on. Numbers are
//! never reused, even after a thread exits.

use std::cell::Cell;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT: AtomicU32 = AtomicU32::new(1);

thread_local! {
    static CURRENT: Cell<u32> = const { Cell::new(0) };
}

/// This thread's number, assigning one on first use.
pub fn thread_number() -> u32 {
    CURRENT.with(|current| {
        let assigned = current.get();
        if assigned != 0 {
            return assigned;
        }
        let next = NEXT.fetch_add(1, Ordering::Relaxed);
        current.set(next);
        next
    })
}

/// This thread's number if one was already assigned.
pub fn assigned_thread_number() -> Option<u32> {
    CURRENT.with(|current| Some(current.get()).filter(|n| *n != 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn stable_within_a_thread() {
        let first = thread_number();
        assert_eq!(thread_number(), first);
        assert_eq!(assigned_thread_number(), Some(first));
    }

    #[test]
    fn peeking_does_not_assign() {
        let peeked = thread::spawn(assigned_thread_number)
            .join()
            .expect("thread panicked");
        assert_eq!(peeked, None);
    }

    #[test]
    fn distinct_across_threads() {
        let numbers: HashSet<u32> = (0..8)
            .map(|_| thread::spawn(thread_number))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().expect("thread panicked"))
            .collect();
        assert_eq!(numbers.len(), 8);
        assert!(numbers.iter().all(|n| *n >= 1));
    }
}
