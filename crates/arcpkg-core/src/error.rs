use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unexpected file structure in {} (is this a valid .arcpkg file?)", .0.display())]
    InvalidPackageStructure(PathBuf),

    #[error("'project.arcproj' not found in {} (is this a valid .arcpkg file?)", .0.display())]
    DescriptorNotFound(PathBuf),

    #[error("Folder name '{0}' yields an empty song id")]
    EmptySongId(String),

    #[error("Descriptor is missing required key '{0}'")]
    MissingField(&'static str),

    #[error("No .aff files found in {}", .0.display())]
    ChartNotFound(PathBuf),

    #[error("Failed to rename chart '{from}' to '{to}': {message}")]
    ChartRenameFailed {
        from: String,
        to: String,
        message: String,
    },

    #[error("Failed generating '{target}': {message}")]
    Transcode { target: String, message: String },

    #[error("Failed generating 'preview.ogg': {0}")]
    PreviewFailed(String),

    #[error("'{0}' not found, cannot generate preview")]
    CanonicalAudioMissing(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse failure classes, used by the binary to choose an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The package does not have the expected layout.
    Structural,
    /// Image or audio processing failed.
    Media,
    /// Bad user input: prompt answers or configuration.
    Input,
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Structural => 2,
            Self::Media => 3,
            Self::Input => 4,
            Self::Io => 5,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPackageStructure(_)
            | Self::DescriptorNotFound(_)
            | Self::EmptySongId(_)
            | Self::MissingField(_)
            | Self::ChartNotFound(_)
            | Self::Archive(_) => ErrorKind::Structural,
            Self::Transcode { .. }
            | Self::PreviewFailed(_)
            | Self::CanonicalAudioMissing(_)
            | Self::Image(_) => ErrorKind::Media,
            Self::ChartRenameFailed { .. } | Self::ConfigParseError(_) | Self::Prompt(_) => {
                ErrorKind::Input
            }
            Self::Io(_) | Self::Json(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
