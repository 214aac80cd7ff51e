//! Benchmarks for frame encoding and end-to-end extraction.
//!
//! Run with: cargo bench
//!
//! The end-to-end benchmark requires fixture files from
//! `tests/fixtures/generate_fixtures.sh`.

use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use framedump::{
    ExtractOptions, FfmpegLogLevel, FrameExtractor, OutputFormat, encode_frame,
};
use image::{Rgb, RgbImage};

const SAMPLE_VIDEO: &str = "tests/fixtures/sample_video.mp4";

fn hd_frame() -> RgbImage {
    RgbImage::from_fn(1280, 720, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn benchmark_frame_encoding(criterion: &mut Criterion) {
    let frame = hd_frame();

    for name in ["jpg", "png", "bmp"] {
        let format = OutputFormat::parse(name);
        criterion.bench_function(&format!("encode 720p frame ({name})"), |bencher| {
            bencher.iter(|| encode_frame(&frame, &format, 80).unwrap());
        });
    }

    let jpeg = OutputFormat::parse("jpg");
    for quality in [30u8, 95] {
        criterion.bench_function(&format!("encode 720p frame (jpg q{quality})"), |bencher| {
            bencher.iter(|| encode_frame(&frame, &jpeg, quality).unwrap());
        });
    }
}

fn benchmark_full_extraction(criterion: &mut Criterion) {
    framedump::set_ffmpeg_log_level(FfmpegLogLevel::Error);

    if !Path::new(SAMPLE_VIDEO).exists() {
        eprintln!("Skipping benchmark: fixture not found");
        return;
    }

    let temporary_directory = tempfile::tempdir().unwrap();

    let mut group = criterion.benchmark_group("extract all frames");
    group.sample_size(10);
    for name in ["jpg", "png"] {
        let extractor = FrameExtractor::new(
            ExtractOptions::new()
                .with_output_dir(temporary_directory.path().join(name))
                .with_format(name),
        );
        group.bench_function(name, |bencher| {
            bencher.iter(|| extractor.extract(SAMPLE_VIDEO).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_frame_encoding, benchmark_full_extraction);
criterion_main!(benches);
