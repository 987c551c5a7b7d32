use std::io::{BufWriter, Write};
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use log::{info, warn};

use crate::aggregator::{Aggregator, ChunkOutput};
use crate::cancel::CancellationToken;
use crate::chunking::plan_chunks;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{GlobalStatistics, LineOutcome};
use crate::progress::{ProgressBoard, ProgressReporter};
use crate::source::LineSource;
use crate::worker::{run_worker, WorkerOptions};

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunReport),
    /// The cancellation token was raised; nothing should be written
    Terminated,
}

/// Statistics and annotated lines of a completed run
#[derive(Debug)]
pub struct RunReport {
    pub statistics: GlobalStatistics,
    /// Chunk outputs in the order the workers finished
    pub chunks: Vec<ChunkOutput>,
}

impl RunReport {
    /// All retained annotated lines, chunk by chunk in arrival order
    pub fn outcomes(&self) -> impl Iterator<Item = &LineOutcome> {
        self.chunks.iter().flat_map(|chunk| chunk.outcomes.iter())
    }

    /// First `n` rendered output lines
    pub fn sample(&self, n: usize) -> Vec<String> {
        self.outcomes().take(n).map(ToString::to_string).collect()
    }

    /// Write one line per retained outcome
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        for outcome in self.outcomes() {
            writeln!(writer, "{}", outcome)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Parallel batch engine over line-range chunks
///
/// The input is split by line position into one chunk per worker. Every
/// worker runs on its own blocking thread with a private discount engine,
/// so the monthly cap and the LP-large counter are enforced per chunk.
/// Results are merged as workers finish.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use shipping_discounts::concurrent_engine::{ParallelEngine, RunOutcome};
/// use shipping_discounts::config::EngineConfig;
/// use shipping_discounts::source::FileSource;
///
/// #[tokio::main]
/// async fn main() -> shipping_discounts::error::Result<()> {
///     let engine = ParallelEngine::new(EngineConfig::default().with_workers(4));
///     let source = Arc::new(FileSource::open("input.txt")?);
///
///     if let RunOutcome::Completed(report) = engine.run(source).await? {
///         println!("valid lines: {}", report.statistics.tallies.valid);
///     }
///     Ok(())
/// }
/// ```
pub struct ParallelEngine {
    config: EngineConfig,
    cancel: CancellationToken,
    progress: Arc<ProgressBoard>,
}

impl ParallelEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_cancellation(config, CancellationToken::new())
    }

    /// Create an engine that stops when `cancel` is raised
    pub fn with_cancellation(config: EngineConfig, cancel: CancellationToken) -> Self {
        let progress = Arc::new(ProgressBoard::new(config.workers));
        Self {
            config,
            cancel,
            progress,
        }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Per-worker progress counters of the current run
    pub fn progress(&self) -> Arc<ProgressBoard> {
        Arc::clone(&self.progress)
    }

    /// Count, split, process and merge `source`
    ///
    /// Failing to read the input while counting is fatal and happens before
    /// any worker starts. Problems inside a chunk only shorten that chunk.
    pub async fn run(&self, source: Arc<dyn LineSource>) -> Result<RunOutcome> {
        let workers = self.config.workers;
        if workers == 0 {
            return Err(EngineError::NoWorkers);
        }

        let mut aggregator = Aggregator::new();

        let counter = Arc::clone(&source);
        let total_lines = tokio::task::spawn_blocking(move || counter.count_lines()).await??;

        let chunks = plan_chunks(total_lines, workers);
        info!(
            "Processing {} lines with {} workers ({} lines per chunk)",
            total_lines,
            workers,
            total_lines / workers
        );

        // Scoped to this run so a failing worker can stop its siblings
        // without touching the caller's token
        let run_cancel = CancellationToken::new();
        let forward = {
            let outer = self.cancel.clone();
            let inner = run_cancel.clone();
            tokio::spawn(async move {
                outer.cancelled().await;
                inner.cancel();
            })
        };

        self.progress.reset();
        let reporter = self.config.show_progress.then(|| {
            ProgressReporter::spawn(
                Arc::clone(&self.progress),
                total_lines,
                self.config.progress_interval,
                run_cancel.clone(),
            )
        });

        let options = WorkerOptions {
            publish_every: self.config.publish_every,
            outcome_limit: self.config.outcome_limit,
        };

        let mut pending: FuturesUnordered<_> = chunks
            .into_iter()
            .map(|chunk| {
                let source = Arc::clone(&source);
                let cancel = run_cancel.clone();
                let progress = Arc::clone(&self.progress);
                tokio::task::spawn_blocking(move || {
                    run_worker(chunk, &*source, &cancel, &progress, options)
                })
            })
            .collect();

        let collected = loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break Ok(false),
                next = pending.next() => match next {
                    Some(Ok(partial)) => aggregator.add(partial),
                    Some(Err(e)) => break Err(EngineError::from(e)),
                    None => break Ok(true),
                },
            }
        };

        // Workers still running see the raised flag and exit at their next record
        if !matches!(collected, Ok(true)) {
            run_cancel.cancel();
        }
        forward.abort();

        if let Some(reporter) = reporter {
            reporter.stop().await;
        }

        if let Err(e) = &collected {
            warn!("Worker failed, stopping remaining chunks: {}", e);
        }
        if !collected? || self.cancel.is_cancelled() {
            warn!(
                "Run cancelled after {} of {} chunks",
                aggregator.chunks_merged(),
                workers
            );
            return Ok(RunOutcome::Terminated);
        }

        let (statistics, chunks) = aggregator.finish();
        info!(
            "Finished in {:?}: {} valid, {} ignored, total discount {:.2}",
            statistics.timing.elapsed,
            statistics.tallies.valid,
            statistics.tallies.rejected,
            statistics.tallies.total_discount
        );

        Ok(RunOutcome::Completed(RunReport { statistics, chunks }))
    }
}
