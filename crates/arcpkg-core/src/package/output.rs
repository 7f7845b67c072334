//! Result of a package run and its console summary.

use std::fmt::Write as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;

use crate::aff::RewriteReport;

/// What happened to the package's chart scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    /// The single chart was sanitized and copied once per rating class
    Sanitized {
        source: String,
        copies: Vec<String>,
        report: RewriteReport,
    },
    /// Several charts were found and renamed as instructed; none were rewritten
    Renamed(Vec<(String, String)>),
}

/// Where a processed package ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutput {
    pub song_id: String,
    /// Downloadable assets: jackets and preview
    pub download_dir: PathBuf,
    /// Playable content: charts, songlist, audio
    pub content_dir: PathBuf,
    /// Source image the jackets were made from, if a square one was found
    pub jacket_source: Option<String>,
    /// Source audio converted to the canonical track, if one needed converting
    pub transcoded_audio: Option<String>,
    pub charts: ChartOutcome,
}

impl PackageOutput {
    /// One-line completion message
    pub fn completion_message(&self) -> String {
        format!(
            "Processing complete. Files are saved in {} and {}",
            self.download_dir.display(),
            self.content_dir.display()
        )
    }
}

/// Format a package result for console display with colored output
pub fn format_summary(output: &PackageOutput) -> String {
    let mut text = String::new();
    let border = "━".repeat(50);

    let _ = writeln!(text, "{}", border.dimmed());
    let _ = writeln!(text, "  {}", output.song_id.bold());
    let _ = writeln!(text, "{}", border.dimmed());

    let jacket = match &output.jacket_source {
        Some(source) => format!("from {}", source).green().to_string(),
        None => "no square image, skipped".yellow().to_string(),
    };
    let _ = writeln!(text, "  Jacket:   {}", jacket);

    let audio = match &output.transcoded_audio {
        Some(source) => format!("converted from {}", source),
        None => "already canonical".to_string(),
    };
    let _ = writeln!(text, "  Audio:    {}", audio);

    match &output.charts {
        ChartOutcome::Sanitized {
            source,
            copies,
            report,
        } => {
            let _ = writeln!(
                text,
                "  Chart:    {} -> {}",
                source,
                copies.join(", ").green()
            );
            let _ = writeln!(
                text,
                "            scenecontrol {} kept / {} removed, timinggroup {} cleared, arc {} repaired",
                report.scene_controls_kept,
                report.scene_controls_removed.red(),
                report.timing_groups_cleared.yellow(),
                report.arcs_repaired.yellow()
            );
        }
        ChartOutcome::Renamed(renames) => {
            let _ = writeln!(text, "  Charts:   {}", "renamed, not sanitized".yellow());
            for (from, to) in renames {
                let _ = writeln!(text, "            {} -> {}", from, to);
            }
        }
    }

    let _ = writeln!(text, "  Download: {}", output.download_dir.display());
    let _ = writeln!(text, "  Content:  {}", output.content_dir.display());
    let _ = write!(text, "{}", border.dimmed());
    text
}
