//! Error types for the `framedump` crate.
//!
//! [`FramedumpError`] is returned by every fallible operation. Variants carry
//! the path or frame count involved so the CLI can report a failure without
//! extra logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framedump` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramedumpError {
    /// The input does not resolve to a decodable video.
    ///
    /// Covers a missing file, a file FFmpeg cannot demux, a container with no
    /// video stream, and a video stream with no usable decoder.
    #[error("Cannot open file {path}: {reason}")]
    UnopenableSource {
        /// Path that was passed to [`VideoSource::open`](crate::VideoSource::open).
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {reason}")]
    OutputDirectory {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying reason.
        reason: String,
    },

    /// A single frame could not be encoded or written. The run stops here.
    #[error("Failed to write frame to {path} after {frames_written} frame(s): {reason}")]
    FrameWrite {
        /// Destination of the frame that failed.
        path: PathBuf,
        /// Frames successfully written before the failure.
        frames_written: u64,
        /// Underlying reason.
        reason: String,
    },

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while encoding a frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl FramedumpError {
    /// Returns `true` when the source could not be opened at all.
    ///
    /// The CLI treats this case as a reported condition rather than a
    /// process failure.
    pub fn is_unopenable_source(&self) -> bool {
        matches!(self, FramedumpError::UnopenableSource { .. })
    }
}

impl From<FfmpegError> for FramedumpError {
    fn from(error: FfmpegError) -> Self {
        FramedumpError::FfmpegError(error.to_string())
    }
}
