use std::sync::{Condvar, Mutex};

/// A sticky latch: once signaled it stays signaled until explicitly reset,
/// and every waiter — current or future — is released by one `signal`.
///
/// Mirrors a manual-reset event. Spurious wake-ups are handled by rechecking
/// the predicate in a loop rather than trusting a single `notify`.
pub struct ManualResetEvent {
    set: Mutex<bool>,
    condvar: Condvar,
}

impl ManualResetEvent {
    pub fn new() -> Self {
        Self {
            set: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    /// Transitions to the signaled state and wakes every waiter. Idempotent.
    pub fn signal(&self) {
        let mut set = self.set.lock().unwrap();
        *set = true;
        self.condvar.notify_all();
    }

    /// Transitions back to unsignaled. Has no effect on waits already returned.
    pub fn reset(&self) {
        let mut set = self.set.lock().unwrap();
        *set = false;
    }

    /// Blocks until signaled; returns immediately if already signaled.
    pub fn wait(&self) {
        let mut set = self.set.lock().unwrap();
        while !*set {
            set = self.condvar.wait(set).unwrap();
        }
    }

    pub fn is_set(&self) -> bool {
        *self.set.lock().unwrap()
    }
}

impl Default for ManualResetEvent {
    fn default() -> Self {
        Self::new()
    }
}
