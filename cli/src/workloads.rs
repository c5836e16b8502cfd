//! Small workloads that show each way of timing a scope.

use std::thread;
use std::time::Duration;

use scopetimer_core::{ScopeTimer, scope_timer, scope_timer_if};

// Sleeping keeps the numbers readable without burning CPU.
fn busy_for(duration: Duration) {
    thread::sleep(duration);
}

pub fn simple_work() {
    scope_timer!("simpleWork");
    busy_for(Duration::from_micros(2500));
}

pub fn nested_scopes() {
    scope_timer!("nestedScopes:outer");
    busy_for(Duration::from_micros(1000));
    {
        scope_timer!("nestedScopes:inner 1");
        busy_for(Duration::from_micros(1500));
    }
    {
        scope_timer!("nestedScopes:inner 2");
        busy_for(Duration::from_micros(2500));
    }
    busy_for(Duration::from_micros(500));
}

/// Two timers in one block; the second one reports first.
pub fn multiple_timers_same_scope() {
    scope_timer!("multi:first");
    busy_for(Duration::from_micros(700));
    scope_timer!("multi:second");
    busy_for(Duration::from_micros(800));
}

/// The work always runs; only the timing depends on `enabled`.
pub fn conditional_work(enabled: bool) {
    scope_timer_if!(enabled, "conditionalWork");
    busy_for(Duration::from_micros(1200));
}

pub fn looped_work(iterations: u32) {
    scope_timer!("loopedWork:total");
    for _ in 0..iterations {
        scope_timer!("loopedWork:iteration");
        busy_for(Duration::from_micros(300));
    }
}

pub fn threaded_work(threads: u32) {
    scope_timer!("threadedWork:total");
    thread::scope(|s| {
        for i in 0..threads {
            s.spawn(move || {
                scope_timer!("threadedWork:worker");
                busy_for(Duration::from_micros(500 + u64::from(i) * 200));
            });
        }
    });
}

/// Timers inside methods, including a label passed in by the caller.
#[derive(Debug, Clone, Copy)]
pub struct Worker {
    _private: (),
}

impl Worker {
    pub fn new() -> Self {
        scope_timer!("Worker:constructor");
        busy_for(Duration::from_micros(500));
        Self { _private: () }
    }

    pub fn do_task(&self, name: &str) {
        scope_timer!(name);
        busy_for(Duration::from_micros(1000));
    }

    pub fn do_multiple_tasks(&self, count: u32, timed: bool) {
        scope_timer_if!(timed, "Worker:doMultipleTasks");
        for _ in 0..count {
            self.do_task("Worker:task");
        }
    }
}

/// Its whole lifetime is timed by the field, from construction to drop.
pub struct LifetimeTracked {
    _lifetime: ScopeTimer<'static>,
}

impl LifetimeTracked {
    pub fn new() -> Self {
        let tracked = Self {
            _lifetime: ScopeTimer::new("LifetimeTracked", "LifetimeTracked"),
        };
        busy_for(Duration::from_micros(500));
        tracked
    }
}

impl Drop for LifetimeTracked {
    fn drop(&mut self) {
        busy_for(Duration::from_micros(500));
    }
}

/// How big one pass of [`run_all`] is.
#[derive(Debug, Clone, Copy)]
pub struct Plan {
    pub threads: u32,
    pub iterations: u32,
}

/// One pass over every workload, in the order a reader would expect to see them.
pub fn run_all(plan: Plan) {
    simple_work();
    nested_scopes();
    multiple_timers_same_scope();
    conditional_work(false);
    conditional_work(true);
    looped_work(plan.iterations);
    threaded_work(plan.threads);

    let worker = Worker::new();
    worker.do_task("Worker:singleTask");
    worker.do_multiple_tasks(3, true);
    worker.do_multiple_tasks(2, false);

    {
        let _tracked = LifetimeTracked::new();
        busy_for(Duration::from_micros(1500));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopetimer_core::config::{self, Config};
    use scopetimer_core::sink::{self, MemorySink};

    fn labels(captured: &MemorySink) -> Vec<String> {
        captured
            .lines()
            .iter()
            .filter_map(|line| {
                let rest = line.strip_prefix('[')?;
                rest.split_once("] TID=").map(|(label, _)| label.to_owned())
            })
            .collect()
    }

    // One test owns the process-wide sink so nothing races over it.
    #[test]
    fn one_pass_logs_every_enabled_timer() {
        config::install(Config::from_vars([("SCOPE_TIMER_FORMAT", "MICROS")]));
        let captured = MemorySink::new();
        sink::set_sink(captured.clone());

        run_all(Plan {
            threads: 3,
            iterations: 5,
        });

        let labels = labels(&captured);
        let count = |label: &str| labels.iter().filter(|l| *l == label).count();

        assert_eq!(count("simpleWork"), 1);
        assert_eq!(count("conditionalWork"), 1);
        assert_eq!(count("loopedWork:iteration"), 5);
        assert_eq!(count("loopedWork:total"), 1);
        assert_eq!(count("threadedWork:worker"), 3);
        assert_eq!(count("Worker:task"), 5);
        assert_eq!(count("Worker:doMultipleTasks"), 1);
        assert_eq!(count("LifetimeTracked"), 1);

        let position = |label: &str| labels.iter().position(|l| l == label);
        assert!(position("multi:second") < position("multi:first"));
        assert!(position("nestedScopes:inner 2") < position("nestedScopes:outer"));
        assert!(position("threadedWork:worker") < position("threadedWork:total"));

        // 1 + 3 + 2 + 1 + 6 + 4 + 1 + 1 + 4 + 2 + 1
        assert_eq!(labels.len(), 26);

        sink::restore_default_sink();
        config::reset();
    }
}
