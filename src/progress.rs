use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use crate::cancel::CancellationToken;

const BAR_WIDTH: usize = 30;

/// One progress slot per worker, indexed by worker id
///
/// Each worker writes only its own slot and the reporter only reads, so no
/// lock is needed. Slots never decrease within a run.
#[derive(Debug)]
pub struct ProgressBoard {
    slots: Box<[AtomicUsize]>,
}

impl ProgressBoard {
    pub fn new(workers: usize) -> Self {
        Self {
            slots: (0..workers).map(|_| AtomicUsize::new(0)).collect(),
        }
    }

    /// Record that `worker_id` has consumed `lines` lines of its chunk
    pub fn publish(&self, worker_id: usize, lines: usize) {
        if let Some(slot) = self.slots.get(worker_id) {
            slot.fetch_max(lines, Ordering::Release);
        }
    }

    /// Zero every slot before a new run
    pub fn reset(&self) {
        for slot in self.slots.iter() {
            slot.store(0, Ordering::Release);
        }
    }

    pub fn total(&self) -> usize {
        self.slots
            .iter()
            .map(|slot| slot.load(Ordering::Acquire))
            .sum()
    }

    pub fn snapshot(&self) -> Vec<usize> {
        self.slots
            .iter()
            .map(|slot| slot.load(Ordering::Acquire))
            .collect()
    }
}

/// Render one progress line: bar, percentage, counts, rate and ETA
pub fn render_bar(done: usize, total: usize, elapsed: Duration) -> String {
    let done = done.min(total);
    let (percent, filled) = if total == 0 {
        (100.0, BAR_WIDTH)
    } else {
        (
            100.0 * done as f64 / total as f64,
            BAR_WIDTH * done / total,
        )
    };

    let secs = elapsed.as_secs_f64();
    let rate = if secs > 0.0 { done as f64 / secs } else { 0.0 };
    let eta = if done > 0 && rate > 0.0 {
        format!("{:.0}s", (total - done) as f64 / rate)
    } else {
        "--".to_string()
    };

    format!(
        "Processing |{}{}| {:.1}% ({}/{}) {:.1} lines/s ETA: {}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        percent,
        done,
        total,
        rate,
        eta
    )
}

/// Handle to a running progress reporter task
pub struct ProgressReporter {
    stop: CancellationToken,
    handle: JoinHandle<()>,
}

impl ProgressReporter {
    /// Start polling `board` every `interval` and redraw the bar on stderr
    ///
    /// The task ends when the board reaches `total`, when `cancel` is raised,
    /// or when [`stop`](Self::stop) is called.
    pub fn spawn(
        board: Arc<ProgressBoard>,
        total: usize,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let stop = CancellationToken::new();
        let stop_signal = stop.clone();

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let mut ticker = tokio::time::interval(interval);
            let mut stderr = std::io::stderr();

            loop {
                tokio::select! {
                    _ = stop_signal.cancelled() => break,
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let done = board.total();
                let _ = write!(stderr, "\r{}", render_bar(done, total, started.elapsed()));
                let _ = stderr.flush();

                if done >= total {
                    break;
                }
            }

            let _ = writeln!(stderr);
        });

        Self { stop, handle }
    }

    /// Stop the reporter and wait for its final redraw
    pub async fn stop(self) {
        self.stop.cancel();
        let _ = self.handle.await;
    }
}
