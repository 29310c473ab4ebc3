use std::sync::Mutex;

/// Where a terminal stage's output goes.
///
/// Only the terminal stage of a pipeline (the one with no forward handle
/// attached) ever calls this; every other stage forwards instead.
pub trait OutputSink: Send + Sync {
    fn emit(&self, stage_name: &str, payload: &str);
}

/// Writes `[<stage-name>] <payload>` to standard output, per the wire format.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&self, stage_name: &str, payload: &str) {
        println!("[{stage_name}] {payload}");
    }
}

/// Discards everything. Useful for benchmarks that want to isolate queue
/// throughput from I/O cost.
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&self, _stage_name: &str, _payload: &str) {}
}

/// Collects emitted lines in memory instead of writing to a real stream.
/// Used by integration tests to assert on pipeline output without capturing
/// process-wide stdout.
#[derive(Default)]
pub struct CollectingSink {
    lines: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl OutputSink for CollectingSink {
    fn emit(&self, stage_name: &str, payload: &str) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("[{stage_name}] {payload}"));
    }
}
