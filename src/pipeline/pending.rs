//! Outstanding folder-task counter: the only state mutated by every scan worker.
//!
//! The walk is complete exactly when the count returns to zero. A child task must be
//! [`add`](PendingTasks::add)ed before it is pushed, and its parent retired only after all of
//! its children were counted, so zero can never be observed early.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
pub struct PendingTasks {
    count: Mutex<usize>,
    zero: Condvar,
}

impl PendingTasks {
    pub fn new(initial: usize) -> Self {
        Self {
            count: Mutex::new(initial),
            zero: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count `n` new tasks.
    pub fn add(&self, n: usize) {
        *self.lock() += n;
    }

    /// Retire one task; wakes waiters when the count reaches zero.
    pub fn done(&self) {
        let mut count = self.lock();
        debug_assert!(*count > 0, "task retired more often than created");
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.zero.notify_all();
        }
    }

    pub fn current(&self) -> usize {
        *self.lock()
    }

    /// Block until every counted task has been retired.
    pub fn wait_for_zero(&self) {
        let mut count = self.lock();
        while *count > 0 {
            count = self
                .zero
                .wait(count)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Retire one task when the returned guard drops, including during a panic unwind.
    pub fn retire_on_drop(&self) -> TaskRetirement<'_> {
        TaskRetirement { pending: self }
    }
}

pub struct TaskRetirement<'a> {
    pending: &'a PendingTasks,
}

impl Drop for TaskRetirement<'_> {
    fn drop(&mut self) {
        self.pending.done();
    }
}
