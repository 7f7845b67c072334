//! Pipeline configuration.
//!
//! This module contains:
//! - `PipelineConfig` - tunable settings, loadable from a TOML file
//! - `layout` - canonical file names inside a package and its outputs
//! - `preview` - preview clip timing defaults
//! - `jacket` - jacket artwork sizes

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Canonical names inside an extracted package and the two output folders.
pub mod layout {
    /// Extension of input packages
    pub const PACKAGE_EXTENSION: &str = "arcpkg";

    /// Project descriptor inside the project folder
    pub const DESCRIPTOR: &str = "project.arcproj";

    /// Songlist sidecar written next to the charts
    pub const SONGLIST: &str = "songlist";

    /// Full-size jacket
    pub const JACKET: &str = "1080_base.jpg";

    /// Thumbnail jacket
    pub const JACKET_THUMBNAIL: &str = "1080_base_256.jpg";

    /// Canonical audio track
    pub const BASE_AUDIO: &str = "base.ogg";

    /// Audio preview clip
    pub const PREVIEW_AUDIO: &str = "preview.ogg";

    /// Prefix of the extraction folder (`extracted_<name>`)
    pub const EXTRACT_PREFIX: &str = "extracted_";

    /// Prefix of the downloadable-assets folder (`dl_<id>`)
    pub const DOWNLOAD_PREFIX: &str = "dl_";

    /// Files moved to the downloadable-assets folder
    pub const DOWNLOAD_FILES: [&str; 3] = [JACKET, JACKET_THUMBNAIL, PREVIEW_AUDIO];

    /// Image extensions considered as jacket sources
    pub const IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

    /// Audio extensions considered as track sources
    pub const AUDIO_EXTENSIONS: [&str; 2] = ["mp3", "ogg"];
}

/// Preview clip timing, in seconds.
pub mod preview {
    pub const DURATION_SECS: u32 = 20;
    pub const FADE_SECS: u32 = 1;
}

/// Jacket artwork edge lengths, in pixels.
pub mod jacket {
    pub const FULL_SIZE: u32 = 768;
    pub const THUMBNAIL_SIZE: u32 = 384;
}

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Where the two output folders are created (defaults to the package's folder)
    pub output_dir: Option<PathBuf>,
    /// Copy the package instead of consuming it
    pub keep_package: bool,
    /// ffmpeg executable used for audio work
    pub ffmpeg: PathBuf,
    pub preview_duration_secs: u32,
    pub preview_fade_secs: u32,
    pub jacket_size: u32,
    pub thumbnail_size: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            keep_package: false,
            ffmpeg: PathBuf::from("ffmpeg"),
            preview_duration_secs: preview::DURATION_SECS,
            preview_fade_secs: preview::FADE_SECS,
            jacket_size: jacket::FULL_SIZE,
            thumbnail_size: jacket::THUMBNAIL_SIZE,
        }
    }
}

impl PipelineConfig {
    /// Load config from a TOML file; missing keys keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.preview_fade_secs * 2 > self.preview_duration_secs {
            return Err(Error::ConfigParseError(format!(
                "preview fades ({}s each) do not fit in a {}s clip",
                self.preview_fade_secs, self.preview_duration_secs
            )));
        }
        if self.jacket_size == 0 || self.thumbnail_size == 0 {
            return Err(Error::ConfigParseError(
                "jacket sizes must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Second at which the preview fade-out starts
    pub fn fade_out_start(&self) -> u32 {
        self.preview_duration_secs.saturating_sub(self.preview_fade_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.preview_duration_secs, 20);
        assert_eq!(config.preview_fade_secs, 1);
        assert_eq!(config.fade_out_start(), 19);
        assert_eq!(config.jacket_size, 768);
        assert_eq!(config.thumbnail_size, 384);
        assert!(!config.keep_package);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = PipelineConfig::parse(
            r#"
keep_package = true
ffmpeg = "/opt/ffmpeg/bin/ffmpeg"
preview_duration_secs = 30
"#,
        )
        .unwrap();

        assert!(config.keep_package);
        assert_eq!(config.ffmpeg, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(config.preview_duration_secs, 30);
        assert_eq!(config.preview_fade_secs, 1);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(PipelineConfig::parse("preview_duration_secs = 1\npreview_fade_secs = 1").is_err());
        assert!(PipelineConfig::parse("jacket_size = 0").is_err());
        assert!(PipelineConfig::parse("jacket_size = \"big\"").is_err());
    }

    #[test]
    fn test_download_files() {
        assert!(layout::DOWNLOAD_FILES.contains(&layout::PREVIEW_AUDIO));
        assert!(!layout::DOWNLOAD_FILES.contains(&layout::BASE_AUDIO));
    }
}
