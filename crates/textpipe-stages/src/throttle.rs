use std::thread;
use std::time::Duration;
use textpipe_core::Transform;

/// Pass-through that sleeps a fixed duration per character before returning
/// the payload unchanged. Used to exercise chained backpressure: the sleep
/// runs on the stage's own consumer thread, never while the queue's mutex is
/// held, so it slows exactly this stage without blocking unrelated stages
/// from making progress on their own queues.
pub struct Throttle {
    per_char: Duration,
}

impl Throttle {
    pub fn new(per_char: Duration) -> Self {
        Self { per_char }
    }
}

impl Default for Throttle {
    /// A small default delay: enough to make chained backpressure
    /// observable in a demo run without making the pipeline feel stuck.
    fn default() -> Self {
        Self::new(Duration::from_millis(5))
    }
}

impl Transform for Throttle {
    fn apply(&self, input: String) -> Option<String> {
        for _ in input.chars() {
            thread::sleep(self.per_char);
        }
        Some(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn sleeps_once_per_character() {
        let throttle = Throttle::new(Duration::from_millis(5));
        let start = Instant::now();
        let out = throttle.apply("abcd".into());
        assert_eq!(out, Some("abcd".to_string()));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn empty_input_does_not_sleep() {
        let throttle = Throttle::new(Duration::from_secs(1));
        let start = Instant::now();
        throttle.apply(String::new());
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
