use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Key-value manifest of a chart project (`project.arcproj`)
///
/// The format is one `key: value` pair per line. Parsing never fails:
/// lines without a colon, or with an empty key or value, are skipped.
#[derive(Debug, Clone, Default)]
pub struct Descriptor {
    entries: HashMap<String, String>,
}

impl Descriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a descriptor from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse descriptor content; later duplicate keys overwrite earlier ones
    pub fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();

        for line in content.split('\n') {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };

            let key = key.trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                continue;
            }

            entries.insert(key.to_string(), value.to_string());
        }

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Get a value that must be present
    pub fn require(&self, key: &'static str) -> Result<&str> {
        self.get(key).ok_or(Error::MissingField(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }
}
