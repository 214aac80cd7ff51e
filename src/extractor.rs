//! The frame extraction loop.
//!
//! [`FrameExtractor`] pulls frames from a [`FrameSource`] until it is
//! exhausted and writes each one as `frame_NNNNNN.<ext>` into the configured
//! directory. Frame indices start at 0 and grow by exactly one per written
//! frame, so the returned count always equals the number of files written.
//!
//! # Example
//!
//! ```no_run
//! use framedump::{ExtractOptions, FrameExtractor};
//!
//! let options = ExtractOptions::new().with_output_dir("frames").with_format("png");
//! let summary = FrameExtractor::new(options).extract("input.mkv")?;
//! println!("{summary}");
//! # Ok::<(), framedump::FramedumpError>(())
//! ```

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    configuration::ExtractOptions,
    encoder::write_frame,
    error::FramedumpError,
    format::OutputFormat,
    naming::{INDEX_WIDTH_LIMIT, frame_file_name},
    progress::ProgressTracker,
    source::{FrameSource, VideoSource},
};

/// Outcome of a completed extraction.
#[derive(Debug, Clone)]
#[must_use]
pub struct ExtractionSummary {
    /// Number of files written, `frame_000000` through `frame_{n-1}`.
    pub frames_written: u64,
    /// Directory the frames were written to.
    pub output_dir: PathBuf,
    /// Format the frames were encoded as.
    pub format: OutputFormat,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl Display for ExtractionSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "Extraction complete! {} frames saved in '{}'.",
            self.frames_written,
            self.output_dir.display()
        )
    }
}

/// Writes every frame of a source to numbered image files.
#[derive(Debug, Clone, Default)]
pub struct FrameExtractor {
    options: ExtractOptions,
}

impl FrameExtractor {
    /// Create an extractor for the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// The options this extractor writes with.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Decode the video at `input` and write all of its frames.
    ///
    /// The output directory is created first. The decode session is closed
    /// before this returns, whether or not extraction succeeded.
    ///
    /// # Errors
    ///
    /// - [`FramedumpError::OutputDirectory`] if the directory cannot be created.
    /// - [`FramedumpError::UnopenableSource`] if `input` is not a decodable
    ///   video. No frames are written in that case.
    /// - [`FramedumpError::FrameWrite`] if a frame cannot be encoded or
    ///   written. Frames before it remain on disk.
    /// - [`FramedumpError::VideoDecodeError`] on a fatal decoder error.
    pub fn extract<P: AsRef<Path>>(&self, input: P) -> Result<ExtractionSummary, FramedumpError> {
        self.prepare_output_dir()?;
        let mut source = VideoSource::open(input)?;
        self.run(&mut source)
    }

    /// Write all frames of an already opened source.
    pub fn extract_from<S: FrameSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<ExtractionSummary, FramedumpError> {
        self.prepare_output_dir()?;
        self.run(source)
    }

    fn prepare_output_dir(&self) -> Result<(), FramedumpError> {
        let dir = &self.options.output_dir;
        fs::create_dir_all(dir).map_err(|error| FramedumpError::OutputDirectory {
            path: dir.clone(),
            reason: error.to_string(),
        })
    }

    fn run<S: FrameSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<ExtractionSummary, FramedumpError> {
        let format = &self.options.format;
        let quality = self.options.quality;
        let output_dir = &self.options.output_dir;

        log::debug!(
            "Writing frames to {} as {} (quality {})",
            output_dir.display(),
            format,
            if format.is_lossy() {
                quality.to_string()
            } else {
                "n/a".to_string()
            },
        );

        let mut tracker = ProgressTracker::new(
            self.options.progress.clone(),
            source.frame_count_hint(),
            self.options.batch_size,
        );

        let mut index: u64 = 0;
        while let Some(frame) = source.next_frame()? {
            if index == INDEX_WIDTH_LIMIT {
                log::warn!(
                    "More than {INDEX_WIDTH_LIMIT} frames: file names no longer sort in frame order"
                );
            }

            let path = output_dir.join(frame_file_name(index, format.extension()));
            write_frame(&frame, &path, format, quality).map_err(|error| {
                FramedumpError::FrameWrite {
                    path: path.clone(),
                    frames_written: index,
                    reason: error.to_string(),
                }
            })?;
            log::trace!("Wrote frame {index} to {}", path.display());

            index += 1;
            tracker.advance(path);
        }

        let elapsed = tracker.finish();
        log::debug!("Wrote {index} frame(s) in {elapsed:?}");

        Ok(ExtractionSummary {
            frames_written: index,
            output_dir: output_dir.clone(),
            format: format.clone(),
            elapsed,
        })
    }
}

/// Extract every frame of `input` into `output_dir`.
///
/// Shorthand for building [`ExtractOptions`] and calling
/// [`FrameExtractor::extract`]. Returns the number of frames written.
///
/// ```no_run
/// let count = framedump::extract("input.mp4", "frames", "jpg", 80)?;
/// println!("{count} frames saved");
/// # Ok::<(), framedump::FramedumpError>(())
/// ```
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    format: &str,
    quality: u8,
) -> Result<u64, FramedumpError> {
    let options = ExtractOptions::new()
        .with_output_dir(output_dir)
        .with_format(format)
        .with_quality(quality);
    let summary = FrameExtractor::new(options).extract(input)?;
    Ok(summary.frames_written)
}
