//! Frame encoding.
//!
//! Frames are encoded into memory first and then written in one call, so a
//! failed encode never leaves a partial file behind.

use std::{fs, io::Cursor, path::Path};

use image::{ImageError, RgbImage, codecs::jpeg::JpegEncoder};

use crate::{configuration::MAX_QUALITY, error::FramedumpError, format::OutputFormat};

/// Encode `frame` as `format`.
///
/// `quality` is passed to the JPEG encoder and ignored for every other
/// format. The JPEG encoder accepts 1..=100, so 0 encodes as 1.
pub fn encode_frame(
    frame: &RgbImage,
    format: &OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, ImageError> {
    let mut bytes = Vec::new();

    if format.is_lossy() {
        let quality = quality.clamp(1, MAX_QUALITY);
        let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
        frame.write_with_encoder(encoder)?;
    } else {
        frame.write_to(&mut Cursor::new(&mut bytes), format.image_format())?;
    }

    Ok(bytes)
}

/// Encode `frame` and write it to `path`, replacing any existing file.
pub fn write_frame(
    frame: &RgbImage,
    path: &Path,
    format: &OutputFormat,
    quality: u8,
) -> Result<(), FramedumpError> {
    let bytes = encode_frame(frame, format, quality)?;
    fs::write(path, bytes)?;
    Ok(())
}
