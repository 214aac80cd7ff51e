//! Dump every frame of a video, printing progress every 50 frames.
//!
//! Usage:
//!   cargo run --example dump_frames -- <input_file> [output_dir] [format]

use std::error::Error;
use std::sync::Arc;

use framedump::{
    ExtractOptions, FrameExtractor, FrameSource, ProgressCallback, ProgressInfo, VideoSource,
};

struct PrintProgress;

impl ProgressCallback for PrintProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        match (info.total, info.percentage) {
            (Some(total), Some(pct)) => {
                println!("{}/{total} frames ({pct:.1}%)", info.current)
            }
            _ => println!("{} frames", info.current),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| "input.mp4".to_string());
    let output_dir = args.next().unwrap_or_else(|| "frames".to_string());
    let format = args.next().unwrap_or_else(|| "png".to_string());

    println!("Opening {input_path}...");
    let mut source = VideoSource::open(&input_path)?;

    let metadata = source.metadata();
    println!(
        "Video: {}x{}, {:.2} fps, ~{} frames [{}]",
        metadata.width,
        metadata.height,
        metadata.frames_per_second,
        metadata.frame_count,
        metadata.codec,
    );
    if let Some(hint) = source.frame_count_hint() {
        println!("Expecting about {hint} files");
    }

    let options = ExtractOptions::new()
        .with_output_dir(&output_dir)
        .with_format(&format)
        .with_progress(Arc::new(PrintProgress))
        .with_batch_size(50);

    let summary = FrameExtractor::new(options).extract_from(&mut source)?;
    println!("{summary}");
    Ok(())
}
