//! Internal helpers shared by the decode path.

use ffmpeg_next::frame::Video as VideoFrame;

/// Copy an RGB24 FFmpeg frame into a tightly packed buffer.
///
/// FFmpeg rows often carry padding (stride > width × 3); the result has none,
/// so it can go straight into [`image::RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_length = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == row_length {
        data[..row_length * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_length * (height as usize));
        for row in data.chunks(stride).take(height as usize) {
            buffer.extend_from_slice(&row[..row_length]);
        }
        buffer
    }
}
