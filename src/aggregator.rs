use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Local};

use crate::models::{
    Chunk, GlobalStatistics, LineOutcome, MonthKey, MonthlyState, PartialResult, RunTiming,
    Tallies,
};

/// Annotated lines of one chunk, kept in the order the chunk arrived
#[derive(Debug, Clone)]
pub struct ChunkOutput {
    pub chunk: Chunk,
    pub outcomes: Vec<LineOutcome>,
}

/// Folds worker results into run-wide statistics as they arrive
///
/// Merging is a plain key-wise sum: it does not replay the discount rules
/// across chunk boundaries.
#[derive(Debug)]
pub struct Aggregator {
    tallies: Tallies,
    months: BTreeMap<MonthKey, MonthlyState>,
    chunks: Vec<ChunkOutput>,
    chunks_stopped_early: usize,
    started_at: DateTime<Local>,
    clock: Instant,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            tallies: Tallies::default(),
            months: BTreeMap::new(),
            chunks: Vec::new(),
            chunks_stopped_early: 0,
            started_at: Local::now(),
            clock: Instant::now(),
        }
    }

    /// Merge one worker's result; empty chunks need no special handling
    pub fn add(&mut self, partial: PartialResult) {
        self.tallies.merge(&partial.tallies);

        for (month, state) in &partial.months {
            self.months.entry(*month).or_default().absorb(state);
        }

        if partial.stopped_early {
            self.chunks_stopped_early += 1;
        }

        self.chunks.push(ChunkOutput {
            chunk: partial.chunk,
            outcomes: partial.outcomes,
        });
    }

    pub fn chunks_merged(&self) -> usize {
        self.chunks.len()
    }

    /// Stamp the end time and hand back the statistics and per-chunk output
    pub fn finish(self) -> (GlobalStatistics, Vec<ChunkOutput>) {
        let statistics = GlobalStatistics {
            tallies: self.tallies,
            months: self.months,
            chunks_merged: self.chunks.len(),
            chunks_stopped_early: self.chunks_stopped_early,
            timing: RunTiming {
                started_at: self.started_at,
                finished_at: Local::now(),
                elapsed: self.clock.elapsed(),
            },
        };

        (statistics, self.chunks)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
