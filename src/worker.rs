use log::{debug, warn};

use crate::cancel::CancellationToken;
use crate::engine::DiscountEngine;
use crate::models::{Chunk, PartialResult};
use crate::progress::ProgressBoard;
use crate::source::LineSource;

/// Per-worker run parameters
#[derive(Debug, Clone, Copy)]
pub struct WorkerOptions {
    pub publish_every: usize,
    pub outcome_limit: Option<usize>,
}

/// Process one chunk sequentially with a private [`DiscountEngine`]
///
/// Never fails: a cancelled run, an unreadable source or a stream that ends
/// before the chunk does all stop the worker early and return what was
/// accumulated, with `stopped_early` set.
pub fn run_worker(
    chunk: Chunk,
    source: &dyn LineSource,
    cancel: &CancellationToken,
    progress: &ProgressBoard,
    options: WorkerOptions,
) -> PartialResult {
    let mut result = PartialResult::empty(chunk);
    if chunk.is_empty() {
        return result;
    }

    let lines = match source.read_range(chunk.start_line, chunk.len()) {
        Ok(lines) => lines,
        Err(e) => {
            warn!("Worker {}: cannot read chunk: {}", chunk.worker_id, e);
            result.stopped_early = true;
            return result;
        }
    };

    let publish_every = options.publish_every.max(1);
    let mut engine = DiscountEngine::new();
    let mut consumed = 0;

    for line in lines {
        if cancel.is_cancelled() {
            debug!("Worker {}: cancelled after {} lines", chunk.worker_id, consumed);
            result.stopped_early = true;
            break;
        }

        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(
                    "Worker {}: read error after {} lines: {}",
                    chunk.worker_id, consumed, e
                );
                result.stopped_early = true;
                break;
            }
        };

        if let Some(outcome) = engine.process_line(&line) {
            if options.outcome_limit.map_or(true, |limit| result.outcomes.len() < limit) {
                result.outcomes.push(outcome);
            }
        }

        consumed += 1;
        if consumed % publish_every == 0 {
            progress.publish(chunk.worker_id, consumed);
        }
    }

    if !result.stopped_early && consumed < chunk.len() {
        warn!(
            "Worker {}: input ended after {} of {} lines",
            chunk.worker_id,
            consumed,
            chunk.len()
        );
        result.stopped_early = true;
    }

    progress.publish(chunk.worker_id, consumed);

    let (months, tallies) = engine.into_parts();
    result.months = months;
    result.tallies = tallies;

    debug!(
        "Worker {}: lines {}..{} done ({} valid, {} rejected)",
        chunk.worker_id,
        chunk.start_line,
        chunk.end_line,
        result.tallies.valid,
        result.tallies.rejected
    );

    result
}
