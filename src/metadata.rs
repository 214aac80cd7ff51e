//! Video stream metadata.
//!
//! Read once when a [`VideoSource`](crate::VideoSource) opens and cached for
//! the lifetime of the session.

use std::time::Duration;

/// Metadata for the decoded video stream.
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Estimated frame count from duration and frame rate. Zero when either
    /// is unknown.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`).
    pub codec: String,
    /// Container duration.
    pub duration: Duration,
}
