//! Questions the pipeline cannot answer on its own.

use crate::error::{Error, Result};

/// Supplies the answers a package run needs from outside
pub trait PackagePrompter {
    /// Start offset of the audio preview, in seconds
    fn preview_start(&self) -> Result<u32>;

    /// New file names for the chart scripts of a package that ships more than one.
    ///
    /// Must return one name per entry of `charts`, in the same order.
    fn rename_charts(&self, charts: &[String]) -> Result<Vec<String>>;

    /// Show a progress message to the user
    fn display_message(&self, message: &str);
}

/// Prompter for unattended runs: fixed answers, no output.
///
/// Without configured renames, an ambiguous chart set is an error.
#[derive(Debug, Clone, Default)]
pub struct FixedPrompter {
    preview_start: u32,
    renames: Option<Vec<String>>,
}

impl FixedPrompter {
    pub fn new(preview_start: u32) -> Self {
        Self {
            preview_start,
            renames: None,
        }
    }

    pub fn with_renames<I, S>(mut self, renames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.renames = Some(renames.into_iter().map(Into::into).collect());
        self
    }
}

impl PackagePrompter for FixedPrompter {
    fn preview_start(&self) -> Result<u32> {
        Ok(self.preview_start)
    }

    fn rename_charts(&self, charts: &[String]) -> Result<Vec<String>> {
        match &self.renames {
            Some(renames) if renames.len() == charts.len() => Ok(renames.clone()),
            Some(renames) => Err(Error::Prompt(format!(
                "{} chart files found but {} names configured",
                charts.len(),
                renames.len()
            ))),
            None => Err(Error::Prompt(format!(
                "{} chart files found and no names configured: {}",
                charts.len(),
                charts.join(", ")
            ))),
        }
    }

    fn display_message(&self, _message: &str) {}
}
