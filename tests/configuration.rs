//! ExtractOptions builder tests.

use std::path::Path;

use framedump::{DEFAULT_OUTPUT_DIR, DEFAULT_QUALITY, ExtractOptions, FrameExtractor, OutputFormat};

#[test]
fn defaults() {
    let options = ExtractOptions::new();
    assert_eq!(options.output_dir(), Path::new(DEFAULT_OUTPUT_DIR));
    assert_eq!(options.output_dir(), Path::new("frames"));
    assert_eq!(options.format().extension(), "jpg");
    assert_eq!(options.quality(), DEFAULT_QUALITY);
    assert_eq!(options.quality(), 80);
}

#[test]
fn default_trait_matches_new() {
    let from_default = format!("{:?}", ExtractOptions::default());
    let from_new = format!("{:?}", ExtractOptions::new());
    assert_eq!(from_default, from_new);
}

#[test]
fn quality_is_clamped_to_one_hundred() {
    assert_eq!(ExtractOptions::new().with_quality(255).quality(), 100);
    assert_eq!(ExtractOptions::new().with_quality(0).quality(), 0);
    assert_eq!(ExtractOptions::new().with_quality(73).quality(), 73);
}

#[test]
fn format_builders_agree() {
    let by_name = ExtractOptions::new().with_format("Png");
    let resolved = ExtractOptions::new().with_output_format(OutputFormat::parse("png"));
    assert_eq!(by_name.format(), resolved.format());
}

#[test]
fn debug_output() {
    let options = ExtractOptions::new().with_batch_size(0);
    let debug = format!("{options:?}");
    assert!(debug.contains("ExtractOptions"));
    assert!(debug.contains("quality: 80"));
    // Clamped to 1.
    assert!(debug.contains("batch_size: 1"));
}

#[test]
fn extractor_keeps_its_options() {
    let extractor = FrameExtractor::new(ExtractOptions::new().with_output_dir("elsewhere"));
    assert_eq!(extractor.options().output_dir(), Path::new("elsewhere"));
}
