//! Package pipeline: turns an `.arcpkg` archive into deployable folders.
//!
//! Steps run strictly in order and the first failure aborts the run. A failed
//! run leaves its intermediate files on disk.

mod fs;
mod output;

pub use fs::{delete_path, entry_names, files_with_extension, first_subdirectory, move_contents};
pub use output::{ChartOutcome, PackageOutput, format_summary};

use std::fs as stdfs;
use std::path::{Path, PathBuf};

use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use crate::aff::{CHART_EXTENSION, ChartRewriter};
use crate::config::{PipelineConfig, layout};
use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::media::{
    ArchiveExtractor, AudioProcessor, ClipSpec, Ffmpeg, ImageProcessor, RasterImages, ZipExtractor,
};
use crate::prompt::PackagePrompter;
use crate::songlist::{RatingClass, SongEntry};

/// Paths derived from the input package location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePaths {
    /// The package as given
    pub package: PathBuf,
    /// Renamed (or copied) archive, `<name>.zip`
    pub archive: PathBuf,
    /// Extraction folder, `extracted_<name>`
    pub extract_dir: PathBuf,
    /// Parent of the two output folders
    pub output_dir: PathBuf,
}

impl PackagePaths {
    pub fn new(package: &Path, output_dir: Option<&Path>) -> Self {
        let base_dir = package
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let file_name = package
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = format!(".{}", layout::PACKAGE_EXTENSION);
        let stem = file_name
            .strip_suffix(&suffix)
            .filter(|s| !s.is_empty())
            .unwrap_or(&file_name);

        Self {
            package: package.to_path_buf(),
            archive: base_dir.join(format!("{}.zip", stem)),
            extract_dir: base_dir.join(format!("{}{}", layout::EXTRACT_PREFIX, stem)),
            output_dir: output_dir.unwrap_or(base_dir).to_path_buf(),
        }
    }

    pub fn download_dir(&self, song_id: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}", layout::DOWNLOAD_PREFIX, song_id))
    }

    pub fn content_dir(&self, song_id: &str) -> PathBuf {
        self.output_dir.join(song_id)
    }
}

/// Sequential package processor with pluggable media collaborators
pub struct Pipeline {
    config: PipelineConfig,
    extractor: Box<dyn ArchiveExtractor>,
    images: Box<dyn ImageProcessor>,
    audio: Box<dyn AudioProcessor>,
    rewriter: ChartRewriter,
}

impl Pipeline {
    /// Pipeline using zip extraction, the `image` crate and ffmpeg
    pub fn new(config: PipelineConfig) -> Self {
        let audio = Ffmpeg::new(config.ffmpeg.clone());
        Self {
            config,
            extractor: Box::new(ZipExtractor),
            images: Box::new(RasterImages::default()),
            audio: Box::new(audio),
            rewriter: ChartRewriter::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: impl ArchiveExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_images(mut self, images: impl ImageProcessor + 'static) -> Self {
        self.images = Box::new(images);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioProcessor + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_rewriter(mut self, rewriter: ChartRewriter) -> Self {
        self.rewriter = rewriter;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one package end to end
    pub fn run<P: PackagePrompter>(&self, package: &Path, prompter: &P) -> Result<PackageOutput> {
        let paths = PackagePaths::new(package, self.config.output_dir.as_deref());
        info!("Processing package {:?}", paths.package);

        self.unpack(&paths)?;

        let project_dir = first_subdirectory(&paths.extract_dir)?
            .ok_or_else(|| Error::InvalidPackageStructure(paths.extract_dir.clone()))?;
        let folder_name = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Project folder: {}", folder_name);

        let descriptor_path = project_dir.join(layout::DESCRIPTOR);
        if !descriptor_path.is_file() {
            return Err(Error::DescriptorNotFound(project_dir));
        }

        let entry = self.write_songlist(&descriptor_path, &project_dir, &folder_name)?;
        let song_id = entry.id;

        let jacket_source = self.make_jackets(&project_dir)?;
        let transcoded_audio = self.convert_audio(&project_dir)?;
        self.make_preview(&project_dir, prompter)?;

        let download_dir = paths.download_dir(&song_id);
        stdfs::create_dir_all(&download_dir)?;
        let moved = move_contents(&project_dir, &download_dir, |name| {
            layout::DOWNLOAD_FILES.contains(&name)
        })?;
        debug!("Moved {:?} to {:?}", moved, download_dir);

        let content_dir = paths.content_dir(&song_id);
        stdfs::create_dir_all(&content_dir)?;

        for name in entry_names(&project_dir)? {
            if name == layout::DESCRIPTOR || name.ends_with(".json") {
                delete_path(&project_dir.join(&name))?;
            }
        }

        let charts = self.process_charts(&project_dir, prompter)?;

        move_contents(&project_dir, &content_dir, |_| true)?;
        self.clean_up(&paths)?;

        let output = PackageOutput {
            song_id,
            download_dir,
            content_dir,
            jacket_source,
            transcoded_audio,
            charts,
        };
        info!("{}", output.completion_message());
        Ok(output)
    }

    fn unpack(&self, paths: &PackagePaths) -> Result<()> {
        if self.config.keep_package {
            stdfs::copy(&paths.package, &paths.archive)?;
        } else {
            stdfs::rename(&paths.package, &paths.archive)?;
        }

        info!("Extracting to {:?}", paths.extract_dir);
        self.extractor.extract(&paths.archive, &paths.extract_dir)
    }

    fn write_songlist(
        &self,
        descriptor_path: &Path,
        project_dir: &Path,
        folder_name: &str,
    ) -> Result<SongEntry> {
        let descriptor = Descriptor::load(descriptor_path)?;
        debug!("Descriptor has {} keys", descriptor.len());

        let entry = SongEntry::from_descriptor(&descriptor, folder_name)?;
        if entry.id.is_empty() {
            return Err(Error::EmptySongId(folder_name.to_string()));
        }

        entry.save(project_dir.join(layout::SONGLIST))?;
        info!("Wrote songlist for '{}' ({})", entry.title_localized.en, entry.id);
        Ok(entry)
    }

    /// Make both jacket tiers from the first square image; non-square images are skipped
    fn make_jackets(&self, project_dir: &Path) -> Result<Option<String>> {
        for name in files_with_extension(project_dir, &layout::IMAGE_EXTENSIONS)? {
            let source = project_dir.join(&name);
            let (width, height) = match self.images.dimensions(&source) {
                Ok(dims) => dims,
                Err(e) => {
                    warn!("Skipping unreadable image {}: {}", name, e);
                    continue;
                }
            };
            if width != height {
                debug!("Skipping non-square image {} ({}x{})", name, width, height);
                continue;
            }

            let full = self.config.jacket_size;
            let thumb = self.config.thumbnail_size;
            self.images
                .resize(&source, &project_dir.join(layout::JACKET), full, full)?;
            self.images.resize(
                &source,
                &project_dir.join(layout::JACKET_THUMBNAIL),
                thumb,
                thumb,
            )?;

            if !layout::DOWNLOAD_FILES.contains(&name.as_str()) {
                delete_path(&source)?;
            }
            info!("Generated jackets from {}", name);
            return Ok(Some(name));
        }

        debug!("No square image found, jackets skipped");
        Ok(None)
    }

    /// Convert the first non-canonical audio file into the canonical track
    fn convert_audio(&self, project_dir: &Path) -> Result<Option<String>> {
        let Some(name) = files_with_extension(project_dir, &layout::AUDIO_EXTENSIONS)?
            .into_iter()
            .find(|name| name != layout::BASE_AUDIO)
        else {
            return Ok(None);
        };

        let source = project_dir.join(&name);
        let target = project_dir.join(layout::BASE_AUDIO);
        info!("Converting {} to {}", name, layout::BASE_AUDIO);

        self.audio
            .transcode(&source, &target)
            .map_err(|e| transcode_error(layout::BASE_AUDIO, e))?;
        delete_path(&source)?;
        Ok(Some(name))
    }

    fn make_preview<P: PackagePrompter>(&self, project_dir: &Path, prompter: &P) -> Result<()> {
        let base = project_dir.join(layout::BASE_AUDIO);
        if !base.is_file() {
            return Err(Error::CanonicalAudioMissing(layout::BASE_AUDIO.to_string()));
        }

        let clip = ClipSpec {
            start_secs: prompter.preview_start()?,
            duration_secs: self.config.preview_duration_secs,
            fade_secs: self.config.preview_fade_secs,
        };
        info!(
            "Generating {} from {}s ({}s)",
            layout::PREVIEW_AUDIO,
            clip.start_secs,
            clip.duration_secs
        );

        self.audio
            .clip(&base, &project_dir.join(layout::PREVIEW_AUDIO), &clip)
            .map_err(|e| match e {
                Error::Transcode { message, .. } => Error::PreviewFailed(message),
                other => Error::PreviewFailed(other.to_string()),
            })
    }

    fn process_charts<P: PackagePrompter>(
        &self,
        project_dir: &Path,
        prompter: &P,
    ) -> Result<ChartOutcome> {
        let suffix = format!(".{}", CHART_EXTENSION);
        let charts: Vec<String> = entry_names(project_dir)?
            .into_iter()
            .filter(|name| name.ends_with(&suffix) && project_dir.join(name).is_file())
            .collect();

        match charts.as_slice() {
            [] => Err(Error::ChartNotFound(project_dir.to_path_buf())),
            [single] => self.sanitize_chart(project_dir, single),
            _ => {
                prompter.display_message(&format!("Multiple .{} files found!", CHART_EXTENSION));
                for (i, name) in charts.iter().enumerate() {
                    prompter.display_message(&format!("{}. {}", i + 1, name));
                }
                let renames = prompter.rename_charts(&charts)?;
                self.rename_charts(project_dir, &charts, &renames, prompter)
            }
        }
    }

    fn sanitize_chart(&self, project_dir: &Path, name: &str) -> Result<ChartOutcome> {
        let path = project_dir.join(name);
        let content = stdfs::read_to_string(&path)?;
        let (sanitized, report) = self.rewriter.rewrite_with_report(&content);
        stdfs::write(&path, &sanitized)?;
        info!("Processed {}", name);

        let mut copies = Vec::new();
        for class in RatingClass::iter() {
            let copy_name = class.chart_file_name();
            if copy_name != name {
                stdfs::copy(&path, project_dir.join(&copy_name))?;
            }
            debug!("Created duplicate: {}", copy_name);
            copies.push(copy_name);
        }

        Ok(ChartOutcome::Sanitized {
            source: name.to_string(),
            copies,
            report,
        })
    }

    fn rename_charts<P: PackagePrompter>(
        &self,
        project_dir: &Path,
        charts: &[String],
        renames: &[String],
        prompter: &P,
    ) -> Result<ChartOutcome> {
        if renames.len() != charts.len() {
            return Err(Error::Prompt(format!(
                "expected {} chart names, got {}",
                charts.len(),
                renames.len()
            )));
        }

        let mut done = Vec::new();
        for (from, to) in charts.iter().zip(renames) {
            let to = to.trim();
            let rejection = if to.is_empty() {
                Some("name is empty")
            } else if Path::new(to).file_name().is_none_or(|n| n != to) {
                Some("name must be a plain file name")
            } else if to != from && project_dir.join(to).exists() {
                Some("a file with that name already exists")
            } else {
                None
            };
            if let Some(message) = rejection {
                return Err(Error::ChartRenameFailed {
                    from: from.clone(),
                    to: to.to_string(),
                    message: message.to_string(),
                });
            }

            stdfs::rename(project_dir.join(from), project_dir.join(to)).map_err(|e| {
                Error::ChartRenameFailed {
                    from: from.clone(),
                    to: to.to_string(),
                    message: e.to_string(),
                }
            })?;
            prompter.display_message(&format!("Renamed {} to {}", from, to));
            done.push((from.clone(), to.to_string()));
        }

        Ok(ChartOutcome::Renamed(done))
    }

    fn clean_up(&self, paths: &PackagePaths) -> Result<()> {
        delete_path(&paths.extract_dir)?;
        delete_path(&paths.archive)?;
        if !self.config.keep_package {
            delete_path(&paths.package)?;
        }
        Ok(())
    }
}

fn transcode_error(target: &str, e: Error) -> Error {
    match e {
        e @ Error::Transcode { .. } => e,
        other => Error::Transcode {
            target: target.to_string(),
            message: other.to_string(),
        },
    }
}
