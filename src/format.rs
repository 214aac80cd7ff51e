//! Output image format selection.
//!
//! [`OutputFormat`] turns the user's format string into an encoding from the
//! [`image`] crate plus the file extension written to disk. Parsing never
//! rejects a value: names the `image` crate cannot write fall back to JPEG.
//!
//! ```
//! use framedump::OutputFormat;
//!
//! let format = OutputFormat::parse("PNG");
//! assert_eq!(format.extension(), "png");
//! assert!(!format.is_lossy());
//!
//! let format = OutputFormat::parse("jpeg");
//! assert_eq!(format.extension(), "jpeg");
//! assert!(format.is_lossy());
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use image::ImageFormat;

/// Extension used when no format is given or the requested one is unusable.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Extension used for every PNM-family request.
const PNM_EXTENSION: &str = "ppm";

/// `true` when the `image` encoder for `format` takes 8-bit RGB at any size.
///
/// HDR, OpenEXR and Farbfeld only encode float or 16-bit buffers; ICO caps
/// both dimensions at 256.
fn accepts_rgb_frames(format: ImageFormat) -> bool {
    format.writing_enabled()
        && !matches!(
            format,
            ImageFormat::Hdr | ImageFormat::OpenExr | ImageFormat::Farbfeld | ImageFormat::Ico
        )
}

/// An image encoding together with the extension used for output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormat {
    format: ImageFormat,
    extension: String,
}

impl OutputFormat {
    /// Resolve a user-supplied format name, case-insensitively.
    ///
    /// A leading `.` is ignored. `jpg` and `jpeg` keep their spelling as the
    /// output extension. Any other name is looked up with
    /// [`ImageFormat::from_extension`]; when that fails, or the format cannot
    /// encode 8-bit RGB frames of any size, a warning is logged and JPEG is
    /// used instead. Every PNM-family name writes binary PPM with a `ppm`
    /// extension, since frames are always RGB.
    pub fn parse(value: &str) -> Self {
        let extension = value.trim().trim_start_matches('.').to_ascii_lowercase();

        match extension.as_str() {
            "jpg" | "jpeg" => {
                return Self {
                    format: ImageFormat::Jpeg,
                    extension,
                };
            }
            "" => return Self::default(),
            _ => {}
        }

        match ImageFormat::from_extension(&extension) {
            Some(ImageFormat::Pnm) => Self {
                format: ImageFormat::Pnm,
                extension: PNM_EXTENSION.to_string(),
            },
            Some(format) if accepts_rgb_frames(format) => Self { format, extension },
            Some(format) => {
                log::warn!(
                    "{format:?} images cannot be written, falling back to {DEFAULT_EXTENSION}"
                );
                Self::default()
            }
            None => {
                log::warn!(
                    "Unrecognised image format '{extension}', falling back to {DEFAULT_EXTENSION}"
                );
                Self::default()
            }
        }
    }

    /// The encoding passed to the `image` crate.
    pub fn image_format(&self) -> ImageFormat {
        self.format
    }

    /// Lowercase extension without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `true` when a quality setting changes the output (JPEG only).
    pub fn is_lossy(&self) -> bool {
        self.format == ImageFormat::Jpeg
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            format: ImageFormat::Jpeg,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.extension)
    }
}
