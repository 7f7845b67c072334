use std::path::Path;

use image::imageops::FilterType;
use tracing::debug;

use super::ImageProcessor;
use crate::error::Result;

/// Image work backed by the `image` crate.
///
/// Output is always written as RGB so JPEG targets accept sources with alpha.
#[derive(Debug, Clone, Copy)]
pub struct RasterImages {
    filter: FilterType,
}

impl RasterImages {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Default for RasterImages {
    fn default() -> Self {
        Self::new(FilterType::Lanczos3)
    }
}

impl ImageProcessor for RasterImages {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        Ok(image::image_dimensions(path)?)
    }

    fn resize(&self, source: &Path, target: &Path, width: u32, height: u32) -> Result<()> {
        debug!("Resizing {:?} to {}x{} -> {:?}", source, width, height, target);
        let resized = image::open(source)?.resize_exact(width, height, self.filter);
        resized.to_rgb8().save(target)?;
        Ok(())
    }
}
