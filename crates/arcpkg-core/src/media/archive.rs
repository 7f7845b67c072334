use std::fs::{self, File};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use super::ArchiveExtractor;
use crate::error::Result;

/// Extracts zip-based packages with the `zip` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()> {
        let file = File::open(archive)?;
        let mut zip = ZipArchive::new(file)?;
        debug!("Extracting {} entries from {:?}", zip.len(), archive);

        fs::create_dir_all(destination)?;
        zip.extract(destination)?;
        Ok(())
    }
}
