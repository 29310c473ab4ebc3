use crate::item::Item;
use crate::queue::QueueError;
use crate::registry::StageRegistry;
use crate::sink::OutputSink;
use crate::worker::StageWorker;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown stage \"{0}\"")]
    UnknownStage(String),
}

/// An assembled, running chain of stages.
///
/// `Pipeline` owns every stage in creation order; [`Pipeline::shutdown`]
/// waits on and destroys them in that same order, which matches the order
/// the sentinel propagates down the chain.
pub struct Pipeline {
    stages: Vec<Arc<StageWorker>>,
}

impl Pipeline {
    /// Resolves each name via `registry`, creates one stage per occurrence
    /// (duplicates get independent instances because each resolution
    /// allocates a fresh transform and a fresh worker), then wires stage
    /// *i*'s forward handle to stage *i+1*. On any unknown name, already
    /// created stages are torn down in reverse order before returning the
    /// error.
    pub fn build(
        names: &[impl AsRef<str>],
        capacity: usize,
        registry: &StageRegistry,
        sink: Arc<dyn OutputSink>,
    ) -> Result<Self, LoadError> {
        let mut stages: Vec<Arc<StageWorker>> = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            let transform = match registry.resolve(name) {
                Some(t) => t,
                None => {
                    for stage in stages.iter().rev() {
                        stage.destroy();
                    }
                    return Err(LoadError::UnknownStage(name.to_string()));
                }
            };
            stages.push(StageWorker::new(name, transform, capacity, Arc::clone(&sink)));
        }

        for i in 0..stages.len().saturating_sub(1) {
            let next = Arc::clone(&stages[i + 1]);
            // Each stage is attached exactly once here, immediately after
            // creation, so this can never hit `WorkerError::AlreadyAttached`.
            stages[i].attach(next.forward_fn()).expect("stage attached twice during build");
        }

        Ok(Self { stages })
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.get_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Feeds one item into the first stage.
    pub fn enqueue_first(&self, item: Item) -> Result<(), QueueError> {
        match self.stages.first() {
            Some(stage) => stage.enqueue(item),
            None => Ok(()),
        }
    }

    /// Waits for every stage to finish (in chain order), then destroys
    /// every stage (in chain order). Assumes the sentinel has already been
    /// enqueued into stage 0 by the caller (the driver).
    pub fn shutdown(&self) {
        for stage in &self.stages {
            stage.wait_finished();
        }
        for stage in &self.stages {
            stage.destroy();
        }
    }
}
