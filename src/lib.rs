//! # framedump
//!
//! Dump every frame of a video file to numbered image files.
//!
//! `framedump` opens a video with FFmpeg (via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate), decodes it
//! frame by frame, and writes each frame as `frame_000000.jpg`,
//! `frame_000001.jpg`, … using the [`image`] crate for encoding.
//!
//! ## Quick Start
//!
//! ```no_run
//! let count = framedump::extract("input.mkv", "frames", "png", 80)?;
//! println!("{count} frames saved");
//! # Ok::<(), framedump::FramedumpError>(())
//! ```
//!
//! ### With options
//!
//! ```no_run
//! use framedump::{ExtractOptions, FrameExtractor};
//!
//! let options = ExtractOptions::new()
//!     .with_output_dir("out")
//!     .with_format("jpg")
//!     .with_quality(90);
//!
//! let summary = FrameExtractor::new(options).extract("input.mp4")?;
//! println!("{summary}");
//! # Ok::<(), framedump::FramedumpError>(())
//! ```
//!
//! ## Behaviour
//!
//! - The output directory is created if missing; existing files are
//!   overwritten when names collide.
//! - Frame names are zero-padded to 6 digits and sort in frame order up to
//!   one million frames.
//! - Quality only applies to JPEG.
//! - A source that cannot be opened yields
//!   [`FramedumpError::UnopenableSource`] and writes nothing.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on the build machine.

pub mod configuration;
pub mod encoder;
pub mod error;
pub mod extractor;
pub mod ffmpeg;
pub mod format;
pub mod metadata;
pub mod naming;
pub mod progress;
pub mod source;
mod utilities;

pub use configuration::{DEFAULT_OUTPUT_DIR, DEFAULT_QUALITY, ExtractOptions};
pub use encoder::{encode_frame, write_frame};
pub use error::FramedumpError;
pub use extractor::{ExtractionSummary, FrameExtractor, extract};
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use format::OutputFormat;
pub use metadata::VideoMetadata;
pub use naming::frame_file_name;
pub use progress::{ProgressCallback, ProgressInfo};
pub use source::{FrameSource, VideoSource};
