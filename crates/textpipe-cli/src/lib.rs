//! Argument parsing and stage-registry wiring for the `analyzer` binary.
//!
//! Kept separate from `main.rs` so the argument-error and load-error paths
//! (usage text, exit codes) are exercised by ordinary `#[test]`s instead of
//! only by spawning the compiled binary.

use std::io::{BufRead, Write};
use std::sync::Arc;
use textpipe_core::{Driver, LoadError, Pipeline, StageRegistry, StdoutSink};

pub const USAGE: &str = "usage: analyzer <queue_size> <stage1> [stage2 ...]";

pub enum ArgError {
    /// Missing queue size, missing stage list, non-numeric or non-positive
    /// queue size. Per the external contract this prints usage to standard
    /// output, not an error to standard error.
    Usage,
}

/// Parses `analyzer <queue_size> <stage1> ... <stageN>` (argv without the
/// program name). Returns the parsed capacity and stage name list.
pub fn parse_args(args: &[String]) -> Result<(usize, Vec<String>), ArgError> {
    if args.len() < 2 {
        return Err(ArgError::Usage);
    }

    let capacity: usize = match args[0].parse::<i64>() {
        Ok(n) if n > 0 => n as usize,
        _ => return Err(ArgError::Usage),
    };

    let stages = args[1..].to_vec();
    Ok((capacity, stages))
}

fn registry() -> StageRegistry {
    let mut registry = StageRegistry::new();
    textpipe_stages::register_all(&mut registry);
    registry
}

/// Runs the full `analyzer` program against injected I/O streams, returning
/// the process exit code. Mirrors the argument-error / load-error / success
/// taxonomy in the external-interfaces and error-handling sections: usage
/// goes to `stdout`, load/argument failures beyond usage go to `stderr`.
pub fn run<R: BufRead, W: Write, E: Write>(
    args: &[String],
    input: R,
    mut stdout: W,
    mut stderr: E,
) -> i32 {
    let (capacity, stage_names) = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(ArgError::Usage) => {
            let _ = writeln!(stdout, "{USAGE}");
            return 1;
        }
    };

    let registry = registry();
    let sink = Arc::new(StdoutSink);
    let pipeline = match Pipeline::build(&stage_names, capacity, &registry, sink) {
        Ok(pipeline) => pipeline,
        Err(LoadError::UnknownStage(name)) => {
            let _ = writeln!(stderr, "[ERROR][loader] unknown stage \"{name}\"");
            return 1;
        }
    };

    match Driver::run(input, &pipeline, &mut stdout) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(stderr, "[ERROR][driver] {e}");
            1
        }
    }
}
