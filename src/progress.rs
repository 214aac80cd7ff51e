//! Progress reporting.
//!
//! Attach a [`ProgressCallback`] to [`ExtractOptions`](crate::ExtractOptions)
//! to observe a run. Callbacks only observe; they cannot stop extraction.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framedump::{ExtractOptions, FrameExtractor, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         match info.percentage {
//!             Some(pct) => println!("{} frames ({pct:.1}%)", info.current),
//!             None => println!("{} frames", info.current),
//!         }
//!     }
//! }
//!
//! let options = ExtractOptions::new()
//!     .with_progress(Arc::new(PrintProgress))
//!     .with_batch_size(25);
//! FrameExtractor::new(options).extract("input.mp4")?;
//! # Ok::<(), framedump::FramedumpError>(())
//! ```

use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

/// A snapshot of extraction progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames written so far.
    pub current: u64,
    /// Estimated total frames, from container metadata. `None` when the
    /// source does not report a usable estimate.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0) when `total` is known. Capped at
    /// 100 because the total is only an estimate.
    pub percentage: Option<f32>,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
    /// Estimated time remaining, based on throughput so far.
    pub estimated_remaining: Option<Duration>,
    /// The most recently written file.
    pub last_path: Option<PathBuf>,
}

/// Receives progress updates during extraction.
///
/// Implementations must be [`Send`] and [`Sync`] so an
/// [`ExtractOptions`](crate::ExtractOptions) value can be shared freely.
pub trait ProgressCallback: Send + Sync {
    /// Called every `batch_size` frames and once when the run finishes.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards every notification. The default callback.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Tracks timing for one run and fires the callback.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    total: Option<u64>,
    current: u64,
    batch_size: u64,
    start_time: Instant,
    items_since_last_report: u64,
    last_path: Option<PathBuf>,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        total: Option<u64>,
        batch_size: u64,
    ) -> Self {
        Self {
            callback,
            total: total.filter(|&t| t > 0),
            current: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            items_since_last_report: 0,
            last_path: None,
        }
    }

    /// Record one written frame.
    pub(crate) fn advance(&mut self, path: PathBuf) {
        self.current += 1;
        self.items_since_last_report += 1;
        self.last_path = Some(path);

        if self.items_since_last_report >= self.batch_size {
            self.report();
            self.items_since_last_report = 0;
        }
    }

    /// Emit a final report, regardless of batch position.
    pub(crate) fn finish(&mut self) -> Duration {
        self.report();
        self.start_time.elapsed()
    }

    fn report(&self) {
        let elapsed = self.start_time.elapsed();

        let percentage = self
            .total
            .map(|t| ((self.current as f32 / t as f32) * 100.0).min(100.0));

        let estimated_remaining = if self.current > 0 {
            self.total.map(|t| {
                let remaining = t.saturating_sub(self.current);
                let per_item = elapsed.as_secs_f64() / self.current as f64;
                Duration::from_secs_f64(per_item * remaining as f64)
            })
        } else {
            None
        };

        let info = ProgressInfo {
            current: self.current,
            total: self.total,
            percentage,
            elapsed,
            estimated_remaining,
            last_path: self.last_path.clone(),
        };

        self.callback.on_progress(&info);
    }
}
