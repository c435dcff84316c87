use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use crate::schedule::Schedule;

/// The shared best-known solution for one optimization run, plus the
/// cooperative interrupt flag. `best_makespan` is an atomic so the prune
/// test in the search engine can read it without taking a lock: a
/// stale-high value only prunes less, never more, so an unlocked read stays
/// sound. The schedule itself is never read or written without the mutex,
/// since its update is not atomic with respect to the makespan.
pub struct Incumbent {
    best_makespan: AtomicU32,
    best_schedule: Mutex<Option<Schedule>>,
    interrupted: AtomicBool,
}

impl Incumbent {
    pub fn new() -> Self {
        Incumbent {
            best_makespan: AtomicU32::new(u32::MAX),
            best_schedule: Mutex::new(None),
            interrupted: AtomicBool::new(false),
        }
    }

    /// Resets the registry to its initial state for a new run, clearing any
    /// previous interrupt as well.
    pub fn reset(&self) {
        self.best_makespan.store(u32::MAX, Ordering::SeqCst);
        *self.best_schedule.lock().unwrap() = None;
        self.interrupted.store(false, Ordering::SeqCst);
    }

    /// Unlocked read of the current bound, for use in the prune test only.
    pub fn best_makespan(&self) -> u32 {
        self.best_makespan.load(Ordering::SeqCst)
    }

    /// Atomically installs `(makespan, schedule)` as the new incumbent if
    /// `makespan` strictly improves on the current bound. Double-checks the
    /// bound under the lock so two racing leaves can't both believe they
    /// improved.
    pub fn try_improve(&self, makespan: u32, schedule: &Schedule) -> bool {
        let mut guard = self.best_schedule.lock().unwrap();
        if makespan < self.best_makespan.load(Ordering::SeqCst) {
            self.best_makespan.store(makespan, Ordering::SeqCst);
            *guard = Some(schedule.clone());
            true
        } else {
            false
        }
    }

    /// A consistent read of both fields together.
    pub fn snapshot(&self) -> Option<(u32, Schedule)> {
        let guard = self.best_schedule.lock().unwrap();
        guard
            .as_ref()
            .map(|schedule| (self.best_makespan.load(Ordering::SeqCst), schedule.clone()))
    }

    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduledOp;

    fn dummy_schedule(end: u32) -> Schedule {
        Schedule {
            ops: vec![vec![ScheduledOp { machine: 0, duration: end, start: 0, end }]],
        }
    }

    #[test]
    fn only_strict_improvements_are_recorded() {
        let incumbent = Incumbent::new();
        assert!(incumbent.try_improve(10, &dummy_schedule(10)));
        assert_eq!(incumbent.best_makespan(), 10);
        // Equal makespan does not replace the incumbent: first-found wins.
        assert!(!incumbent.try_improve(10, &dummy_schedule(10)));
        assert!(incumbent.try_improve(7, &dummy_schedule(7)));
        assert_eq!(incumbent.best_makespan(), 7);
        assert!(!incumbent.try_improve(9, &dummy_schedule(9)));
        assert_eq!(incumbent.best_makespan(), 7);
    }

    #[test]
    fn reset_clears_bound_schedule_and_interrupt() {
        let incumbent = Incumbent::new();
        incumbent.try_improve(5, &dummy_schedule(5));
        incumbent.interrupt();
        incumbent.reset();
        assert_eq!(incumbent.best_makespan(), u32::MAX);
        assert!(incumbent.snapshot().is_none());
        assert!(!incumbent.is_interrupted());
    }
}
