use std::thread;
use std::time::Duration;

/// Upper bound on the default worker count
pub const MAX_DEFAULT_WORKERS: usize = 4;

/// Tuning knobs for a parallel run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of chunks, and so of workers
    pub workers: usize,
    /// How often the progress reporter redraws
    pub progress_interval: Duration,
    /// A worker publishes its progress at least once per this many records
    pub publish_every: usize,
    /// Draw a progress bar on stderr while running
    pub show_progress: bool,
    /// Keep at most this many annotated lines per worker; tallies are unaffected
    pub outcome_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            progress_interval: Duration::from_millis(100),
            publish_every: 1000,
            show_progress: false,
            outcome_limit: None,
        }
    }
}

impl EngineConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_publish_every(mut self, records: usize) -> Self {
        self.publish_every = records.max(1);
        self
    }

    pub fn with_outcome_limit(mut self, limit: Option<usize>) -> Self {
        self.outcome_limit = limit;
        self
    }
}

/// `min(4, available cores)`, at least 1
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(MAX_DEFAULT_WORKERS)
}
