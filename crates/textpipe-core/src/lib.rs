//! Concurrent multi-stage pipeline runtime.
//!
//! A pipeline is a chain of [`StageWorker`]s, each owning a [`BoundedQueue`]
//! of [`Item`]s and a dedicated consumer thread. Items flow from the first
//! stage to the last via forward handles wired up by [`Pipeline::build`];
//! the terminal stage writes its output through an [`OutputSink`]. Shutdown
//! is driven by the sentinel [`Item::End`] propagating down the chain.

mod driver;
mod event;
mod item;
mod pipeline;
mod queue;
mod registry;
mod sink;
mod worker;

pub use driver::{Driver, MAX_LINE_BYTES};
pub use event::ManualResetEvent;
pub use item::{Item, SENTINEL};
pub use pipeline::{LoadError, Pipeline};
pub use queue::{BoundedQueue, QueueError};
pub use registry::{StageRegistry, TransformFactory};
pub use sink::{CollectingSink, NullSink, OutputSink, StdoutSink};
pub use worker::{StageWorker, Transform, WorkerError};
