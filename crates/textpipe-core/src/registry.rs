use crate::worker::Transform;
use std::collections::HashMap;
use std::sync::Arc;

/// Produces a fresh, independent transformation instance on every call.
///
/// Resolving the same name twice must yield two separate `Box<dyn
/// Transform>` values with no shared mutable state, so that a pipeline with
/// the same stage name repeated several times gets isolated stage
/// instances rather than contending on one process-wide context.
pub type TransformFactory = Arc<dyn Fn() -> Box<dyn Transform> + Send + Sync>;

/// Maps stage names to transformation factories.
///
/// This is the loader: it replaces dynamic symbol lookup with an in-process
/// name table, and replaces the copy-the-library-to-get-a-fresh-singleton
/// trick with simply calling the factory again.
#[derive(Default)]
pub struct StageRegistry {
    factories: HashMap<String, TransformFactory>,
}

impl StageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, factory: TransformFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Builds a fresh transformation instance for `name`, or `None` if the
    /// name is unknown.
    pub fn resolve(&self, name: &str) -> Option<Box<dyn Transform>> {
        self.factories.get(name).map(|factory| factory())
    }
}
