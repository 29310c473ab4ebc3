use crate::item::Item;
use crate::pipeline::Pipeline;
use std::io::{self, BufRead, Write};

/// Maximum number of bytes read for a single input line, including the
/// trailing newline.
pub const MAX_LINE_BYTES: usize = 1024;

/// Feeds a pipeline from a buffered byte source and orchestrates shutdown.
///
/// The orchestration — line-by-line enqueue, sentinel detection, the
/// explicit end-of-input fallback, and the chain-order wait/destroy/notice
/// sequence — is the part of the driver that matters; the byte source
/// itself is supplied by the caller (the CLI binary passes real standard
/// input; tests pass an in-memory buffer).
pub struct Driver;

impl Driver {
    pub fn run<R: BufRead, W: Write>(
        mut input: R,
        pipeline: &Pipeline,
        mut notice_out: W,
    ) -> io::Result<()> {
        let mut sentinel_seen = false;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let n = read_capped_line(&mut input, &mut buf)?;
            if n == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf).into_owned();
            let item = Item::from_line(line);
            if item.is_end() {
                sentinel_seen = true;
            }
            if let Err(e) = pipeline.enqueue_first(item) {
                eprintln!("[ERROR][driver] {e}");
            }
            if sentinel_seen {
                break;
            }
        }

        if !sentinel_seen {
            if let Err(e) = pipeline.enqueue_first(Item::End) {
                eprintln!("[ERROR][driver] {e}");
            }
        }

        pipeline.shutdown();
        writeln!(notice_out, "Pipeline shutdown complete.")?;
        Ok(())
    }
}

/// Reads one line (up to `MAX_LINE_BYTES`, newline stripped) into `buf`.
/// Returns the number of bytes read from the source, or 0 at EOF.
fn read_capped_line<R: BufRead>(input: &mut R, buf: &mut Vec<u8>) -> io::Result<usize> {
    let mut total = 0;
    loop {
        let available = match input.fill_buf() {
            Ok(b) => b,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(total);
        }

        if let Some(pos) = available.iter().position(|&b| b == b'\n') {
            let take = (pos + 1).min(MAX_LINE_BYTES.saturating_sub(buf.len()));
            buf.extend_from_slice(&available[..take]);
            total += pos + 1;
            input.consume(pos + 1);
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            return Ok(total);
        }

        let take = available.len().min(MAX_LINE_BYTES.saturating_sub(buf.len()));
        buf.extend_from_slice(&available[..take]);
        let consumed = available.len();
        total += consumed;
        input.consume(consumed);
    }
}
