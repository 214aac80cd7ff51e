//! Extraction configuration.
//!
//! [`ExtractOptions`] is the single immutable value describing where and how
//! frames are written. Build it once, then hand it to
//! [`FrameExtractor::new`](crate::FrameExtractor::new).
//!
//! # Example
//!
//! ```
//! use framedump::ExtractOptions;
//!
//! let options = ExtractOptions::new()
//!     .with_output_dir("out/frames")
//!     .with_format("png")
//!     .with_quality(95);
//! assert_eq!(options.format().extension(), "png");
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    format::OutputFormat,
    progress::{NoOpProgress, ProgressCallback},
};

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "frames";

/// JPEG quality used when none is configured.
pub const DEFAULT_QUALITY: u8 = 80;

/// Highest accepted quality value.
pub const MAX_QUALITY: u8 = 100;

/// Where and how extracted frames are written.
///
/// Defaults: directory `frames`, format `jpg`, quality 80, no progress
/// callback, progress batch size 1.
#[derive(Clone)]
pub struct ExtractOptions {
    pub(crate) output_dir: PathBuf,
    pub(crate) format: OutputFormat,
    pub(crate) quality: u8,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) batch_size: u64,
}

impl Debug for ExtractOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExtractOptions")
            .field("output_dir", &self.output_dir)
            .field("format", &self.format.extension())
            .field("quality", &self.quality)
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractOptions {
    /// Options with every default applied.
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::default(),
            quality: DEFAULT_QUALITY,
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
        }
    }

    /// Set the destination directory. It is created when missing.
    #[must_use]
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the output format from a name such as `"png"` or `"JPG"`.
    ///
    /// See [`OutputFormat::parse`] for how unknown names are handled.
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = OutputFormat::parse(format);
        self
    }

    /// Set an already resolved output format.
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set JPEG quality. Values above 100 are clamped. Ignored for
    /// lossless formats.
    #[must_use]
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.min(MAX_QUALITY);
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Fire the progress callback every `size` frames. Clamped to at least 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Destination directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output format.
    pub fn format(&self) -> &OutputFormat {
        &self.format
    }

    /// Configured quality, in 0..=100.
    pub fn quality(&self) -> u8 {
        self.quality
    }
}
