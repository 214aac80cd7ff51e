//! Frame sources.
//!
//! [`FrameSource`] is the decode capability the extractor pulls from: one
//! frame per call until the source reports exhaustion. [`VideoSource`] is
//! the FFmpeg-backed implementation, a decode session over one video file.
//!
//! A `VideoSource` owns its demuxer, decoder, and scaler. Dropping it
//! releases all three, so the session closes on every exit path, including
//! early returns through `?`.
//!
//! # Example
//!
//! ```no_run
//! use framedump::{FrameSource, VideoSource};
//!
//! let mut source = VideoSource::open("input.mp4")?;
//! println!("{}x{}", source.metadata().width, source.metadata().height);
//!
//! while let Some(frame) = source.next_frame()? {
//!     println!("decoded {}x{}", frame.width(), frame.height());
//! }
//! # Ok::<(), framedump::FramedumpError>(())
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;

use crate::{error::FramedumpError, metadata::VideoMetadata};

/// Consecutive non-EOF packet read failures tolerated before giving up.
const MAX_CONSECUTIVE_READ_ERRORS: u32 = 32;

/// What a `receive_frame` call on the decoder means for the read loop.
#[derive(Debug, PartialEq)]
enum ReceiveOutcome {
    /// A frame is ready in the destination.
    Frame,
    /// `EAGAIN`: the decoder wants another packet.
    NeedsInput,
    /// The decoder has flushed everything after EOF.
    Drained,
    Failed(FfmpegError),
}

impl From<Result<(), FfmpegError>> for ReceiveOutcome {
    fn from(result: Result<(), FfmpegError>) -> Self {
        match result {
            Ok(()) => Self::Frame,
            Err(FfmpegError::Other {
                errno: ffmpeg_next::util::error::EAGAIN,
            }) => Self::NeedsInput,
            Err(FfmpegError::Eof) => Self::Drained,
            Err(error) => Self::Failed(error),
        }
    }
}

/// Something frames can be pulled from, one at a time.
pub trait FrameSource {
    /// Pull the next frame. `Ok(None)` means the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<RgbImage>, FramedumpError>;

    /// Estimated number of frames, if known. Used only for progress.
    fn frame_count_hint(&self) -> Option<u64> {
        None
    }
}

/// A decode session over one video file.
///
/// Created with [`VideoSource::open`]; frames come out in decode order as
/// 8-bit RGB at the source resolution.
pub struct VideoSource {
    input_context: Input,
    decoder: VideoDecoder,
    /// Built from the first decoded frame and rebuilt when the frame
    /// geometry or pixel format changes.
    scaler: Option<ScalingContext>,
    video_stream_index: usize,
    metadata: VideoMetadata,
    decoded_frame: VideoFrame,
    scaled_frame: VideoFrame,
    frames_decoded: u64,
    consecutive_read_errors: u32,
    eof_sent: bool,
    finished: bool,
    path: PathBuf,
}

impl Debug for VideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSource")
            .field("path", &self.path)
            .field("video_stream_index", &self.video_stream_index)
            .field("metadata", &self.metadata)
            .field("frames_decoded", &self.frames_decoded)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a decode session on `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FramedumpError::UnopenableSource`] if FFmpeg cannot open the
    /// file, the file has no video stream, or no decoder is available for
    /// it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FramedumpError> {
        let path = path.as_ref();
        let unopenable = |reason: String| FramedumpError::UnopenableSource {
            path: path.to_path_buf(),
            reason,
        };

        log::debug!("Opening video source: {}", path.display());

        crate::ffmpeg::initialize()
            .map_err(|error| unopenable(format!("FFmpeg initialisation failed: {error}")))?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| unopenable(error.to_string()))?;

        let duration = match input_context.duration() {
            microseconds if microseconds > 0 => Duration::from_micros(microseconds as u64),
            _ => Duration::ZERO,
        };

        let (video_stream_index, decoder, frames_per_second, stream_frames) = {
            let stream = input_context
                .streams()
                .best(Type::Video)
                .ok_or_else(|| unopenable("No video stream found in file".to_string()))?;

            let decoder = CodecContext::from_parameters(stream.parameters())
                .map_err(|error| unopenable(format!("Failed to read codec parameters: {error}")))?
                .decoder()
                .video()
                .map_err(|error| unopenable(format!("Failed to create video decoder: {error}")))?;

            let frame_rate = stream.avg_frame_rate();
            let frames_per_second = if frame_rate.denominator() != 0 {
                frame_rate.numerator() as f64 / frame_rate.denominator() as f64
            } else {
                let rate = stream.rate();
                if rate.denominator() != 0 {
                    rate.numerator() as f64 / rate.denominator() as f64
                } else {
                    0.0
                }
            };

            (stream.index(), decoder, frames_per_second, stream.frames())
        };

        let frame_count = if stream_frames > 0 {
            stream_frames as u64
        } else if frames_per_second > 0.0 {
            (duration.as_secs_f64() * frames_per_second) as u64
        } else {
            0
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            frames_per_second,
            frame_count,
            codec,
            duration,
        };

        log::debug!(
            "Opened {}: {}x{} {} @ {:.2} fps, ~{} frames",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.codec,
            metadata.frames_per_second,
            metadata.frame_count,
        );

        Ok(Self {
            input_context,
            decoder,
            scaler: None,
            video_stream_index,
            metadata,
            decoded_frame: VideoFrame::empty(),
            scaled_frame: VideoFrame::empty(),
            frames_decoded: 0,
            consecutive_read_errors: 0,
            eof_sent: false,
            finished: false,
            path: path.to_path_buf(),
        })
    }

    /// Metadata read when the session was opened.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Path the session was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Frames handed out so far.
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    fn decode_next(&mut self) -> Result<Option<RgbImage>, FramedumpError> {
        if self.finished {
            return Ok(None);
        }

        loop {
            match ReceiveOutcome::from(self.decoder.receive_frame(&mut self.decoded_frame)) {
                ReceiveOutcome::Frame => {
                    let image = match self.convert_current_frame() {
                        Ok(image) => image,
                        Err(error) => {
                            self.finished = true;
                            return Err(error);
                        }
                    };
                    self.frames_decoded += 1;
                    return Ok(Some(image));
                }
                ReceiveOutcome::NeedsInput => {}
                ReceiveOutcome::Drained => self.eof_sent = true,
                ReceiveOutcome::Failed(error) => {
                    self.finished = true;
                    return Err(FramedumpError::VideoDecodeError(format!(
                        "decoder failed after frame {}: {error}",
                        self.frames_decoded
                    )));
                }
            }

            // Decoder is drained after EOF: the stream is exhausted.
            if self.eof_sent {
                self.finished = true;
                log::debug!(
                    "End of stream after {} frame(s): {}",
                    self.frames_decoded,
                    self.path.display()
                );
                return Ok(None);
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    self.consecutive_read_errors = 0;
                    if packet.stream() != self.video_stream_index {
                        continue;
                    }
                    match self.decoder.send_packet(&packet) {
                        Ok(()) => {}
                        Err(FfmpegError::InvalidData) => {
                            log::warn!(
                                "Skipping corrupt packet after frame {}",
                                self.frames_decoded
                            );
                        }
                        Err(error) => {
                            self.finished = true;
                            return Err(FramedumpError::VideoDecodeError(error.to_string()));
                        }
                    }
                }
                Err(FfmpegError::Eof) => {
                    if let Err(error) = self.decoder.send_eof() {
                        self.finished = true;
                        return Err(FramedumpError::from(error));
                    }
                    self.eof_sent = true;
                }
                Err(error) => {
                    self.consecutive_read_errors += 1;
                    if self.consecutive_read_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                        self.finished = true;
                        return Err(FramedumpError::VideoDecodeError(format!(
                            "giving up after {MAX_CONSECUTIVE_READ_ERRORS} consecutive read errors: {error}"
                        )));
                    }
                    log::debug!("Packet read error, retrying: {error}");
                }
            }
        }
    }

    /// Convert the current `decoded_frame` to an RGB image.
    fn convert_current_frame(&mut self) -> Result<RgbImage, FramedumpError> {
        let format = self.decoded_frame.format();
        let width = self.decoded_frame.width();
        let height = self.decoded_frame.height();

        let stale = self.scaler.as_ref().is_none_or(|scaler| {
            let input = scaler.input();
            input.format != format || input.width != width || input.height != height
        });

        if stale {
            if format == Pixel::None || width == 0 || height == 0 {
                return Err(FramedumpError::VideoDecodeError(format!(
                    "decoded frame has no usable geometry ({width}x{height}, {format:?})"
                )));
            }
            log::debug!("Building RGB scaler for {width}x{height} {format:?}");
            self.scaler = Some(ScalingContext::get(
                format,
                width,
                height,
                Pixel::RGB24,
                width,
                height,
                ScalingFlags::BILINEAR,
            )?);
            // The scaler only allocates an empty destination.
            self.scaled_frame = VideoFrame::empty();
        }

        if let Some(scaler) = self.scaler.as_mut() {
            scaler.run(&self.decoded_frame, &mut self.scaled_frame)?;
        }

        let buffer = crate::utilities::frame_to_rgb_buffer(&self.scaled_frame, width, height);
        RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            FramedumpError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })
    }
}

impl FrameSource for VideoSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, FramedumpError> {
        self.decode_next()
    }

    fn frame_count_hint(&self) -> Option<u64> {
        Some(self.metadata.frame_count).filter(|&count| count > 0)
    }
}

impl Iterator for VideoSource {
    type Item = Result<RgbImage, FramedumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.decode_next().transpose()
    }
}

impl Drop for VideoSource {
    fn drop(&mut self) {
        log::debug!(
            "Releasing video source {} after {} frame(s)",
            self.path.display(),
            self.frames_decoded
        );
    }
}

#[cfg(test)]
mod tests {
    use ffmpeg_next::{Error as FfmpegError, util::error::EAGAIN};

    use super::ReceiveOutcome;

    #[test]
    fn eagain_asks_for_more_input() {
        assert_eq!(
            ReceiveOutcome::from(Err(FfmpegError::Other { errno: EAGAIN })),
            ReceiveOutcome::NeedsInput
        );
    }

    #[test]
    fn eof_means_drained() {
        assert_eq!(ReceiveOutcome::from(Err(FfmpegError::Eof)), ReceiveOutcome::Drained);
    }

    #[test]
    fn received_frame_is_ready() {
        assert_eq!(ReceiveOutcome::from(Ok(())), ReceiveOutcome::Frame);
    }

    #[test]
    fn other_decoder_errors_are_fatal() {
        for error in [
            FfmpegError::InvalidData,
            FfmpegError::Bug,
            FfmpegError::Other { errno: 12 },
        ] {
            assert_eq!(ReceiveOutcome::from(Err(error)), ReceiveOutcome::Failed(error));
        }
    }
}
