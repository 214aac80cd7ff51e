//! Output file naming.

/// Digits the frame index is zero-padded to.
pub const INDEX_WIDTH: usize = 6;

/// First index whose name no longer fits in [`INDEX_WIDTH`] digits.
///
/// From here on names widen and stop sorting lexicographically in frame
/// order.
pub const INDEX_WIDTH_LIMIT: u64 = 1_000_000;

/// File name for the frame at `index`: `frame_000042.png`.
///
/// ```
/// assert_eq!(framedump::frame_file_name(7, "jpg"), "frame_000007.jpg");
/// assert_eq!(framedump::frame_file_name(1_000_000, "png"), "frame_1000000.png");
/// ```
pub fn frame_file_name(index: u64, extension: &str) -> String {
    format!("frame_{index:0width$}.{extension}", width = INDEX_WIDTH)
}
