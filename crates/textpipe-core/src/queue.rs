use crate::event::ManualResetEvent;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue has zero capacity")]
    ZeroCapacity,
    #[error("queue is finished; no further items accepted")]
    Finished,
}

struct Inner<T> {
    items: VecDeque<T>,
    finished: bool,
}

/// A fixed-capacity, thread-safe FIFO queue with blocking `put`/`get` and a
/// monotonic "finished" signal that drains pending items before reporting
/// exhaustion.
///
/// The ring-buffer capacity accounting lives behind a single [`Mutex`]; two
/// condition variables (`not_full`, `not_empty`) avoid waking producers on a
/// consumer-relevant change and vice versa. `signal_finished` broadcasts on
/// both, and additionally sets an externally observable [`ManualResetEvent`]
/// so callers can `wait_finished` without holding the queue's own lock.
pub struct BoundedQueue<T> {
    capacity: usize,
    inner: Mutex<Inner<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    finished_event: ManualResetEvent,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner {
                items: VecDeque::with_capacity(capacity),
                finished: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            finished_event: ManualResetEvent::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Blocks while the queue is full and not finished. Fails immediately on
    /// a zero-capacity queue, and fails once the queue has finished.
    pub fn put(&self, item: T) -> Result<(), QueueError> {
        if self.capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }

        let mut inner = self.inner.lock().unwrap();
        loop {
            if inner.finished {
                return Err(QueueError::Finished);
            }
            if inner.items.len() < self.capacity {
                inner.items.push_back(item);
                self.not_empty.notify_one();
                return Ok(());
            }
            inner = self.not_full.wait(inner).unwrap();
        }
    }

    /// Blocks while the queue is empty and not finished. Returns `None` once
    /// the queue is both empty and finished (or has zero capacity).
    pub fn get(&self) -> Option<T> {
        if self.capacity == 0 {
            return None;
        }

        let mut inner = self.inner.lock().unwrap();
        loop {
            if let Some(item) = inner.items.pop_front() {
                self.not_full.notify_one();
                return Some(item);
            }
            if inner.finished {
                return None;
            }
            inner = self.not_empty.wait(inner).unwrap();
        }
    }

    /// Marks the queue finished: pending items still drain via `get`, but no
    /// further `put` succeeds. Idempotent and safe to call concurrently.
    pub fn signal_finished(&self) {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.finished = true;
            self.not_full.notify_all();
            self.not_empty.notify_all();
        }
        self.finished_event.signal();
    }

    pub fn is_finished(&self) -> bool {
        self.inner.lock().unwrap().finished
    }

    /// Blocks until `signal_finished` has been called.
    pub fn wait_finished(&self) {
        self.finished_event.wait();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Drop for BoundedQueue<T> {
    fn drop(&mut self) {
        self.signal_finished();
    }
}
