//! CLI argument definitions for arcpkg.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "arcpkg")]
#[command(about = "Convert an .arcpkg chart package into game-ready song folders", version)]
pub struct Args {
    /// Package to convert
    #[arg(value_name = "PACKAGE")]
    pub package: PathBuf,

    /// Pipeline settings (TOML)
    #[arg(short, long, value_name = "FILE", env = "ARCPKG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Where to create the output folders (default: next to the package)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// ffmpeg executable
    #[arg(long, value_name = "PATH", env = "ARCPKG_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Preview start in seconds (skips the prompt)
    #[arg(short, long, value_name = "SECONDS")]
    pub preview_start: Option<u32>,

    /// Copy the package instead of consuming it
    #[arg(long)]
    pub keep_package: bool,
}
