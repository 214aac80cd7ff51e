//! Error handling integration tests.
//!
//! A source that cannot be opened must be reported as
//! `UnopenableSource` and must not produce any frame files.

use std::fs;

use framedump::{ExtractOptions, FrameExtractor, FramedumpError, VideoSource};

#[test]
fn open_nonexistent_file() {
    let result = VideoSource::open("this_file_does_not_exist.mp4");
    let error = result.unwrap_err();
    assert!(error.is_unopenable_source());

    let error_message = error.to_string();
    assert!(
        error_message.contains("Cannot open file"),
        "Error message should mention the open failure: {error_message}",
    );
    assert!(error_message.contains("this_file_does_not_exist.mp4"));
}

#[test]
fn open_invalid_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    fs::write(&invalid_file_path, b"this is not a media file").expect("Failed to write file");

    let result = VideoSource::open(&invalid_file_path);
    match result {
        Err(FramedumpError::UnopenableSource { path, .. }) => {
            assert_eq!(path, invalid_file_path);
        }
        other => panic!("Expected UnopenableSource, got: {other:?}"),
    }
}

#[test]
fn unopenable_source_writes_no_frames() {
    let temporary_directory = tempfile::tempdir().unwrap();
    let output_dir = temporary_directory.path().join("frames");

    let result = FrameExtractor::new(ExtractOptions::new().with_output_dir(&output_dir))
        .extract(temporary_directory.path().join("missing.mkv"));

    assert!(matches!(
        result,
        Err(FramedumpError::UnopenableSource { .. })
    ));
    let written = fs::read_dir(&output_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(written, 0);
}

#[test]
fn convenience_extract_reports_unopenable_source() {
    let temporary_directory = tempfile::tempdir().unwrap();
    let input = temporary_directory.path().join("garbage.mkv");
    fs::write(&input, [0u8; 512]).unwrap();

    let result = framedump::extract(&input, temporary_directory.path().join("out"), "png", 80);
    assert!(result.unwrap_err().is_unopenable_source());
}

#[test]
fn error_messages_carry_context() {
    let error = FramedumpError::FrameWrite {
        path: "frames/frame_000007.png".into(),
        frames_written: 7,
        reason: "disk full".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("frame_000007.png"));
    assert!(message.contains("after 7 frame(s)"));
    assert!(message.contains("disk full"));
    assert!(!error.is_unopenable_source());
}
