//! Media collaborators: archive extraction, image resizing, audio transcoding.
//!
//! The pipeline only talks to the traits defined here, so tests can swap in
//! fakes for tools that are not available (e.g., ffmpeg).

mod archive;
mod audio;
mod image;

use std::path::Path;

use crate::error::Result;

pub use archive::ZipExtractor;
pub use audio::Ffmpeg;
pub use image::RasterImages;

/// Unpacks a package archive
pub trait ArchiveExtractor {
    /// Extract every entry of `archive` below `destination`, keeping directories
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()>;
}

/// Reads and resizes raster images
pub trait ImageProcessor {
    /// Width and height in pixels
    fn dimensions(&self, path: &Path) -> Result<(u32, u32)>;

    /// Write a copy of `source` scaled to exactly `width` x `height`
    fn resize(&self, source: &Path, target: &Path, width: u32, height: u32) -> Result<()>;
}

/// A faded excerpt of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipSpec {
    pub start_secs: u32,
    pub duration_secs: u32,
    pub fade_secs: u32,
}

impl ClipSpec {
    /// Second (relative to the clip) at which the fade-out begins
    pub fn fade_out_start(&self) -> u32 {
        self.duration_secs.saturating_sub(self.fade_secs)
    }
}

/// Converts and trims audio
pub trait AudioProcessor {
    /// Convert `source` into the format implied by `target`
    fn transcode(&self, source: &Path, target: &Path) -> Result<()>;

    /// Cut `clip` out of `source` with a fade at each end
    fn clip(&self, source: &Path, target: &Path, clip: &ClipSpec) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_fade_out_start() {
        let clip = ClipSpec {
            start_secs: 90,
            duration_secs: 20,
            fade_secs: 1,
        };
        assert_eq!(clip.fade_out_start(), 19);
    }
}
