pub mod aff;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod media;
pub mod number;
pub mod package;
pub mod prompt;
pub mod songlist;

pub use aff::{ChartRewriter, RewriteReport, Whitelists};
pub use config::PipelineConfig;
pub use descriptor::Descriptor;
pub use error::{Error, ErrorKind, Result};
pub use media::{
    ArchiveExtractor, AudioProcessor, ClipSpec, Ffmpeg, ImageProcessor, RasterImages, ZipExtractor,
};
pub use package::{ChartOutcome, PackageOutput, PackagePaths, Pipeline, format_summary};
pub use prompt::{FixedPrompter, PackagePrompter};
pub use songlist::{DifficultyEntry, Rating, RatingClass, SongEntry, song_id};
