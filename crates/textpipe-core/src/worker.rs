use crate::item::Item;
use crate::queue::{BoundedQueue, QueueError};
use crate::sink::OutputSink;
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::JoinHandle;
use thiserror::Error;

/// A pure per-item transformation. Must not retain the input.
///
/// Returning `None` drops the item; the sentinel is never passed to this
/// function — it is intercepted and forwarded by the worker loop itself.
pub trait Transform: Send + Sync {
    fn apply(&self, input: String) -> Option<String>;
}

/// The handle a stage uses to push an item into the next stage's queue.
pub type ForwardFn = Arc<dyn Fn(Item) -> Result<(), QueueError> + Send + Sync>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("stage is already attached to a downstream handle")]
    AlreadyAttached,
}

/// One pipeline stage: an owned queue, a consumer thread running the
/// transformation, and an optional forward handle to the next stage.
///
/// `init`/double-`init` and enqueue-before-`init` failure modes named for a
/// C-style host are structurally impossible here — a `StageWorker` cannot be
/// used before `new` returns, and `new` can only run once per value.
pub struct StageWorker {
    name: String,
    queue: Arc<BoundedQueue<Item>>,
    forward: Arc<OnceLock<ForwardFn>>,
    finished: Arc<crate::event::ManualResetEvent>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl StageWorker {
    /// Creates the stage, allocates its queue, and spawns its consumer
    /// thread. The stage is `Created`/`Running` immediately; `attach` may
    /// still be called any time before the first item reaches the
    /// forwarding branch.
    pub fn new(
        name: impl Into<String>,
        transform: Box<dyn Transform>,
        capacity: usize,
        sink: Arc<dyn OutputSink>,
    ) -> Arc<Self> {
        let name = name.into();
        let queue = Arc::new(BoundedQueue::new(capacity));
        let forward: Arc<OnceLock<ForwardFn>> = Arc::new(OnceLock::new());
        let finished = Arc::new(crate::event::ManualResetEvent::new());

        let worker_queue = Arc::clone(&queue);
        let worker_forward = Arc::clone(&forward);
        let worker_finished = Arc::clone(&finished);
        let worker_name = name.clone();
        let join = std::thread::Builder::new()
            .name(format!("stage-{name}"))
            .spawn(move || {
                run_loop(&worker_queue, transform.as_ref(), &worker_name, &worker_forward, sink.as_ref());
                worker_finished.signal();
            })
            .expect("failed to spawn stage consumer thread");

        Arc::new(Self {
            name,
            queue,
            forward,
            finished,
            handle: Mutex::new(Some(join)),
        })
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Takes ownership of `item` and blocks until there is room in the
    /// stage's queue (or the queue has finished).
    pub fn enqueue(&self, item: Item) -> Result<(), QueueError> {
        self.queue.put(item)
    }

    /// Wires this stage's output to the next stage's enqueue. Single-shot:
    /// a second call fails rather than silently replacing the handle.
    pub fn attach(&self, forward: ForwardFn) -> Result<(), WorkerError> {
        self.forward
            .set(forward)
            .map_err(|_| WorkerError::AlreadyAttached)
    }

    /// Returns a forward handle pointing at this stage's own `enqueue`, for
    /// the previous stage in the chain to attach to.
    pub fn forward_fn(self: &Arc<Self>) -> ForwardFn {
        let worker = Arc::clone(self);
        Arc::new(move |item: Item| worker.enqueue(item))
    }

    /// Blocks until this stage's consumer thread has observed the sentinel
    /// or queue exhaustion.
    pub fn wait_finished(&self) {
        self.finished.wait();
    }

    /// Idempotent teardown: signals the queue finished (in case shutdown
    /// wasn't driven by a sentinel) and joins the consumer thread exactly
    /// once.
    pub fn destroy(&self) {
        self.queue.signal_finished();
        if let Ok(mut guard) = self.handle.lock() {
            if let Some(handle) = guard.take() {
                let _ = handle.join();
            }
        }
    }
}

fn run_loop(
    queue: &BoundedQueue<Item>,
    transform: &dyn Transform,
    name: &str,
    forward: &OnceLock<ForwardFn>,
    sink: &dyn OutputSink,
) {
    loop {
        let item = match queue.get() {
            Some(item) => item,
            None => return,
        };

        match item {
            Item::End => {
                if let Some(fwd) = forward.get() {
                    if let Err(e) = fwd(Item::End) {
                        eprintln!("[ERROR][{name}] failed to forward sentinel: {e}");
                    }
                }
                queue.signal_finished();
                return;
            }
            Item::Data(s) => match transform.apply(s) {
                Some(out) => {
                    if let Some(fwd) = forward.get() {
                        if let Err(e) = fwd(Item::Data(out)) {
                            eprintln!("[ERROR][{name}] downstream rejected item: {e}");
                        }
                    } else {
                        sink.emit(name, &out);
                    }
                }
                None => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::CollectingSink;

    struct Uppercase;
    impl Transform for Uppercase {
        fn apply(&self, input: String) -> Option<String> {
            Some(input.to_uppercase())
        }
    }

    struct DropEverything;
    impl Transform for DropEverything {
        fn apply(&self, _input: String) -> Option<String> {
            None
        }
    }

    #[test]
    fn terminal_stage_writes_through_the_sink() {
        let sink = Arc::new(CollectingSink::new());
        let stage = StageWorker::new("upper", Box::new(Uppercase), 4, sink.clone());

        stage.enqueue(Item::Data("hi".into())).unwrap();
        stage.enqueue(Item::End).unwrap();
        stage.wait_finished();
        stage.destroy();

        assert_eq!(sink.lines(), vec!["[upper] HI".to_string()]);
    }

    #[test]
    fn dropped_items_never_reach_the_sink() {
        let sink = Arc::new(CollectingSink::new());
        let stage = StageWorker::new("dropper", Box::new(DropEverything), 4, sink.clone());

        stage.enqueue(Item::Data("anything".into())).unwrap();
        stage.enqueue(Item::End).unwrap();
        stage.wait_finished();
        stage.destroy();

        assert!(sink.lines().is_empty());
    }

    #[test]
    fn sentinel_is_forwarded_but_never_printed() {
        let sink = Arc::new(CollectingSink::new());
        let upstream = StageWorker::new("a", Box::new(Uppercase), 4, sink.clone());
        let downstream = StageWorker::new("b", Box::new(Uppercase), 4, sink.clone());
        upstream.attach(downstream.forward_fn()).unwrap();

        upstream.enqueue(Item::Data("hi".into())).unwrap();
        upstream.enqueue(Item::End).unwrap();

        upstream.wait_finished();
        downstream.wait_finished();
        upstream.destroy();
        downstream.destroy();

        assert_eq!(sink.lines(), vec!["[b] HI".to_string()]);
    }

    #[test]
    fn destroy_is_idempotent() {
        let sink = Arc::new(CollectingSink::new());
        let stage = StageWorker::new("x", Box::new(Uppercase), 4, sink);
        stage.enqueue(Item::End).unwrap();
        stage.wait_finished();
        stage.destroy();
        stage.destroy();
    }

    #[test]
    fn attach_twice_fails() {
        let sink = Arc::new(CollectingSink::new());
        let a = StageWorker::new("a", Box::new(Uppercase), 4, sink.clone());
        let b = StageWorker::new("b", Box::new(Uppercase), 4, sink.clone());
        let c = StageWorker::new("c", Box::new(Uppercase), 4, sink);

        a.attach(b.forward_fn()).unwrap();
        assert!(matches!(a.attach(c.forward_fn()), Err(WorkerError::AlreadyAttached)));

        a.enqueue(Item::End).unwrap();
        a.wait_finished();
        b.enqueue(Item::End).unwrap();
        b.wait_finished();
        a.destroy();
        b.destroy();
        c.destroy();
    }
}
