//! Songlist catalog entry built from a project descriptor.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr, IntoEnumIterator, IntoStaticStr};

use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::number::parse_float_prefix;

/// Descriptor keys the songlist entry is built from
pub mod keys {
    pub const TITLE: &str = "title";
    pub const COMPOSER: &str = "composer";
    pub const DIFFICULTY: &str = "difficulty";
    pub const CHARTER: &str = "charter";
    pub const ILLUSTRATOR: &str = "illustrator";
    pub const BPM_TEXT: &str = "bpmText";
    pub const BASE_BPM: &str = "baseBpm";
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumIter,
    IntoStaticStr,
)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum RatingClass {
    #[strum(serialize = "PST")]
    Past = 0,
    #[strum(serialize = "PRS")]
    Present = 1,
    #[strum(serialize = "FTR")]
    Future = 2,
}

impl RatingClass {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    /// File name of the chart copy for this class (e.g., `2.aff`)
    pub fn chart_file_name(&self) -> String {
        format!("{}.{}", *self as u8, crate::aff::CHART_EXTENSION)
    }
}

impl From<RatingClass> for u8 {
    fn from(class: RatingClass) -> Self {
        class as u8
    }
}

impl TryFrom<u8> for RatingClass {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::from_repr(value).ok_or_else(|| format!("invalid rating class: {}", value))
    }
}

impl std::fmt::Display for RatingClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Numeric level plus the "+" marker (e.g., `9+`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rating {
    pub level: Option<u64>,
    pub plus: bool,
}

impl Rating {
    /// Parse a difficulty string: digits form the level, any `+` sets the marker.
    ///
    /// A string without digits, or with more digits than a `u64` holds, has no
    /// level.
    pub fn parse(difficulty: &str) -> Self {
        let digits: String = difficulty.chars().filter(|c| c.is_ascii_digit()).collect();
        Self {
            level: digits.parse().ok(),
            plus: difficulty.contains('+'),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedTitle {
    pub en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchNames {
    pub ja: String,
    pub ko: String,
}

impl SearchNames {
    fn same(name: &str) -> Self {
        Self {
            ja: name.to_string(),
            ko: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyEntry {
    pub rating_class: RatingClass,
    pub chart_designer: String,
    pub jacket_designer: String,
    pub rating: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_plus: Option<bool>,
}

/// One entry of the game's songlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongEntry {
    pub idx: u32,
    pub id: String,
    pub title_localized: LocalizedTitle,
    pub artist: String,
    pub search_title: SearchNames,
    pub search_artist: SearchNames,
    pub bpm: String,
    /// NaN when the descriptor value is not numeric (serialized as `null`)
    #[serde(deserialize_with = "nullable_f64")]
    pub bpm_base: f64,
    pub set: String,
    pub purchase: String,
    #[serde(rename = "audioPreview")]
    pub audio_preview: u32,
    #[serde(rename = "audioPreviewEnd")]
    pub audio_preview_end: u32,
    pub side: u32,
    pub bg: String,
    pub bg_inverse: String,
    pub remote_dl: bool,
    pub world_unlock: bool,
    pub date: i64,
    pub version: String,
    pub difficulties: Vec<DifficultyEntry>,
}

fn nullable_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Derive the song id from a folder name: lower-case ASCII letters and digits only
pub fn song_id(folder_name: &str) -> String {
    folder_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

impl SongEntry {
    /// Set tag for user-imported songs
    pub const CUSTOM_SET: &'static str = "custom";

    /// Build an entry stamped with the current time
    pub fn from_descriptor(descriptor: &Descriptor, folder_name: &str) -> Result<Self> {
        Self::from_descriptor_at(descriptor, folder_name, Utc::now())
    }

    /// Build an entry from descriptor fields.
    ///
    /// Every key in [`keys`] must be present; `baseBpm` may still be non-numeric.
    pub fn from_descriptor_at(
        descriptor: &Descriptor,
        folder_name: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let title = descriptor.require(keys::TITLE)?;
        let composer = descriptor.require(keys::COMPOSER)?;
        let difficulty = descriptor.require(keys::DIFFICULTY)?;
        let charter = descriptor.require(keys::CHARTER)?;
        let illustrator = descriptor.require(keys::ILLUSTRATOR)?;
        let bpm_text = descriptor.require(keys::BPM_TEXT)?;
        let base_bpm = descriptor.require(keys::BASE_BPM)?;

        let rating = Rating::parse(difficulty);
        let difficulties = RatingClass::iter()
            .map(|rating_class| DifficultyEntry {
                rating_class,
                chart_designer: charter.to_string(),
                jacket_designer: illustrator.to_string(),
                rating: rating.level,
                rating_plus: rating.plus.then_some(true),
            })
            .collect();

        Ok(Self {
            idx: 0,
            id: song_id(folder_name),
            title_localized: LocalizedTitle {
                en: title.to_string(),
            },
            artist: composer.to_string(),
            search_title: SearchNames::same(title),
            search_artist: SearchNames::same(composer),
            bpm: bpm_text.to_string(),
            bpm_base: parse_float_prefix(base_bpm).unwrap_or(f64::NAN),
            set: Self::CUSTOM_SET.to_string(),
            purchase: folder_name.to_string(),
            audio_preview: 0,
            audio_preview_end: 0,
            side: 0,
            bg: String::new(),
            bg_inverse: String::new(),
            remote_dl: true,
            world_unlock: false,
            date: now.timestamp(),
            version: String::new(),
            difficulties,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the entry as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
