//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without running the pipeline.

use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;

#[path = "../src/cli.rs"]
mod cli;

use cli::Args;

#[test]
fn test_parse_package_only() {
    let args = Args::try_parse_from(["arcpkg", "song.arcpkg"]).unwrap();
    assert_eq!(args.package, PathBuf::from("song.arcpkg"));
    assert!(args.output_dir.is_none());
    assert!(args.preview_start.is_none());
    assert!(!args.keep_package);
}

#[test]
fn test_missing_package_is_usage_error() {
    let err = Args::try_parse_from(["arcpkg"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    assert!(err.use_stderr());
}

#[test]
fn test_help_is_not_an_error_exit() {
    let err = Args::try_parse_from(["arcpkg", "--help"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    assert!(!err.use_stderr());
}

#[test]
fn test_parse_all_options() {
    let args = Args::try_parse_from([
        "arcpkg",
        "pkg/song.arcpkg",
        "--config",
        "arcpkg.toml",
        "--output-dir",
        "out",
        "--ffmpeg",
        "/usr/bin/ffmpeg",
        "--preview-start",
        "90",
        "--keep-package",
    ])
    .unwrap();

    assert_eq!(args.config, Some(PathBuf::from("arcpkg.toml")));
    assert_eq!(args.output_dir, Some(PathBuf::from("out")));
    assert_eq!(args.ffmpeg, Some(PathBuf::from("/usr/bin/ffmpeg")));
    assert_eq!(args.preview_start, Some(90));
    assert!(args.keep_package);
}

#[test]
fn test_short_flags() {
    let args = Args::try_parse_from(["arcpkg", "a.arcpkg", "-o", "out", "-p", "5", "-c", "x.toml"])
        .unwrap();
    assert_eq!(args.output_dir, Some(PathBuf::from("out")));
    assert_eq!(args.preview_start, Some(5));
    assert_eq!(args.config, Some(PathBuf::from("x.toml")));
}

#[test]
fn test_preview_start_must_be_number() {
    let result = Args::try_parse_from(["arcpkg", "a.arcpkg", "--preview-start", "1:30"]);
    assert!(result.is_err());

    let result = Args::try_parse_from(["arcpkg", "a.arcpkg", "--preview-start", "-5"]);
    assert!(result.is_err());
}

#[test]
fn test_extra_positional_rejected() {
    let result = Args::try_parse_from(["arcpkg", "a.arcpkg", "b.arcpkg"]);
    assert!(result.is_err());
}
