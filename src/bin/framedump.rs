use std::{
    path::{Path, PathBuf},
    process,
    sync::Arc,
};

use clap::Parser;
use colored::Colorize;
use framedump::{
    DEFAULT_OUTPUT_DIR, DEFAULT_QUALITY, ExtractOptions, ExtractionSummary, FfmpegLogLevel,
    FrameExtractor, OutputFormat, ProgressCallback, ProgressInfo,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framedump input.mkv\n  framedump input.mp4 --output_dir out --format png\n  framedump input.mp4 --quality 95 --progress\n  framedump input.mp4 --json --log-level quiet";

#[derive(Debug, Parser)]
#[command(
    name = "framedump",
    version,
    about = "Extract every frame of a video file as numbered images",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Path to the input video file.
    input: PathBuf,

    /// Output directory for the extracted frames.
    #[arg(long = "output_dir", visible_alias = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Output image format (jpg, jpeg, png, bmp, tiff, webp, ...).
    #[arg(long, default_value = "jpg")]
    format: String,

    /// JPEG quality from 0 to 100. Ignored for other formats.
    #[arg(
        long,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    quality: u8,

    /// Show a progress bar.
    #[arg(long)]
    progress: bool,

    /// Show debug logging.
    #[arg(long)]
    verbose: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<FfmpegLogLevel>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::no_length();
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        // The total is a metadata estimate; never let the bar overflow it.
        if let Some(total) = info.total {
            self.bar.set_length(total.max(info.current));
        }
        self.bar.set_position(info.current);
        if let Some(name) = info.last_path.as_ref().and_then(|path| path.file_name()) {
            self.bar.set_message(name.to_string_lossy().into_owned());
        }
    }
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if verbose {
        builder.filter_module("framedump", log::LevelFilter::Debug);
    }
    builder.init();
}

fn build_options(cli: &Cli) -> ExtractOptions {
    ExtractOptions::new()
        .with_output_dir(&cli.output_dir)
        .with_output_format(OutputFormat::parse(&cli.format))
        .with_quality(cli.quality)
}

fn print_summary(cli: &Cli, summary: &ExtractionSummary) -> Result<(), Box<dyn std::error::Error>> {
    if cli.json {
        let payload = json!({
            "input": cli.input.display().to_string(),
            "output_dir": summary.output_dir.display().to_string(),
            "format": summary.format.extension(),
            "frames_written": summary.frames_written,
            "elapsed_seconds": summary.elapsed.as_secs_f64(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", summary.to_string().green());
    }
    Ok(())
}

/// Line printed when the input cannot be opened as a video.
fn unopenable_message(input: &Path) -> String {
    format!("{} Cannot open file {}", "Error:".red().bold(), input.display())
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(level) = cli.log_level {
        framedump::set_ffmpeg_log_level(level);
    }

    let mut options = build_options(cli);

    let progress = if cli.progress {
        let progress = Arc::new(TerminalProgress::new()?);
        options = options.with_progress(progress.clone());
        Some(progress)
    } else {
        None
    };

    let result = FrameExtractor::new(options).extract(&cli.input);

    if let Some(progress) = &progress {
        progress.bar.finish_and_clear();
    }

    match result {
        Ok(summary) => print_summary(cli, &summary),
        Err(error) if error.is_unopenable_source() => {
            // Reported, not a process failure.
            println!("{}", unopenable_message(&cli.input));
            log::debug!("{error}");
            Ok(())
        }
        Err(error) => Err(error.into()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(error) = run(&cli) {
        eprintln!("{} {error}", "error:".red().bold());
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};
    use framedump::FfmpegLogLevel;

    use super::{Cli, build_options, run, unopenable_message};

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::try_parse_from(["framedump", "input.mkv"]).unwrap();
        assert_eq!(cli.input, Path::new("input.mkv"));
        assert_eq!(cli.output_dir, Path::new("frames"));
        assert_eq!(cli.format, "jpg");
        assert_eq!(cli.quality, 80);
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn output_dir_accepts_both_spellings() {
        let cli = Cli::try_parse_from(["framedump", "in.mp4", "--output_dir", "a"]).unwrap();
        assert_eq!(cli.output_dir, Path::new("a"));

        let cli = Cli::try_parse_from(["framedump", "in.mp4", "--output-dir", "b"]).unwrap();
        assert_eq!(cli.output_dir, Path::new("b"));
    }

    #[test]
    fn quality_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["framedump", "in.mp4", "--quality", "101"]).is_err());
        assert!(Cli::try_parse_from(["framedump", "in.mp4", "--quality", "-1"]).is_err());
        assert!(Cli::try_parse_from(["framedump", "in.mp4", "--quality", "0"]).is_ok());
    }

    #[test]
    fn log_level_parses_aliases() {
        let cli = Cli::try_parse_from(["framedump", "in.mp4", "--log-level", "WARN"]).unwrap();
        assert_eq!(cli.log_level, Some(FfmpegLogLevel::Warning));
        assert!(Cli::try_parse_from(["framedump", "in.mp4", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn options_carry_cli_values() {
        let cli = Cli::try_parse_from([
            "framedump",
            "in.mp4",
            "--output_dir",
            "out",
            "--format",
            "PNG",
            "--quality",
            "42",
        ])
        .unwrap();
        let options = build_options(&cli);
        assert_eq!(options.output_dir(), Path::new("out"));
        assert_eq!(options.format().extension(), "png");
        assert_eq!(options.quality(), 42);
    }

    #[test]
    fn unknown_format_is_accepted() {
        let cli = Cli::try_parse_from(["framedump", "in.mp4", "--format", "xyz"]).unwrap();
        assert_eq!(build_options(&cli).format().extension(), "jpg");
    }

    #[test]
    fn missing_input_is_reported_not_failed() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.mp4");
        let output = dir.path().join("out");
        let cli = Cli::try_parse_from([
            Path::new("framedump"),
            input.as_path(),
            Path::new("--output_dir"),
            output.as_path(),
        ])
        .unwrap();

        assert!(run(&cli).is_ok());
        assert_eq!(std::fs::read_dir(&output).unwrap().count(), 0);
    }

    #[test]
    fn output_dir_that_is_a_file_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.mp4");
        let output = dir.path().join("taken");
        std::fs::write(&output, b"not a directory").unwrap();
        let cli = Cli::try_parse_from([
            Path::new("framedump"),
            input.as_path(),
            Path::new("--output_dir"),
            output.as_path(),
        ])
        .unwrap();

        assert!(run(&cli).is_err());
    }

    #[test]
    fn unopenable_message_names_the_input() {
        let message = unopenable_message(Path::new("/videos/broken.mp4"));
        assert!(message.contains("Error:"));
        assert!(message.ends_with("Cannot open file /videos/broken.mp4"));
    }
}
