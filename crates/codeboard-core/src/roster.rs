use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::platform::Platform;
use crate::ConfigError;

/// One roster row: a roll identifier and up to four profile URLs.
///
/// Field names mirror the spreadsheet column labels the roster is exported
/// from. Every URL column is optional; a missing, null, or blank cell means
/// "not provided".
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRow {
    #[serde(rename = "Roll Number", deserialize_with = "roll_number")]
    pub roll_number: String,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "GeeksforGeeks", default)]
    pub geeksforgeeks: Option<String>,
    #[serde(rename = "CodeChef", default)]
    pub codechef: Option<String>,
    #[serde(rename = "HackerRank", default)]
    pub hackerrank: Option<String>,
    #[serde(rename = "LeetCode", default)]
    pub leetcode: Option<String>,
}

impl StudentRow {
    /// The row's URLs keyed by platform, with blank cells dropped.
    #[must_use]
    pub fn profile_urls(&self) -> ProfileUrls {
        let cells = [
            (Platform::GeeksForGeeks, &self.geeksforgeeks),
            (Platform::CodeChef, &self.codechef),
            (Platform::HackerRank, &self.hackerrank),
            (Platform::LeetCode, &self.leetcode),
        ];
        let urls = cells
            .into_iter()
            .filter_map(|(platform, cell)| {
                let url = cell.as_deref()?.trim();
                (!url.is_empty()).then(|| (platform, url.to_string()))
            })
            .collect();
        ProfileUrls { urls }
    }
}

/// Non-blank profile URLs for one individual.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUrls {
    urls: BTreeMap<Platform, String>,
}

impl ProfileUrls {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL for `platform`. Blank values clear it.
    #[must_use]
    pub fn with(mut self, platform: Platform, url: &str) -> Self {
        let url = url.trim();
        if url.is_empty() {
            self.urls.remove(&platform);
        } else {
            self.urls.insert(platform, url.to_string());
        }
        self
    }

    /// The trimmed URL for `platform`, or `None` when it was not provided.
    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<&str> {
        self.urls.get(&platform).map(String::as_str)
    }

    #[must_use]
    pub fn provided(&self) -> Vec<Platform> {
        self.urls.keys().copied().collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct RosterFile {
    pub students: Vec<StudentRow>,
}

/// Spreadsheet exports write numeric roll numbers as numbers; accept both.
fn roll_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Cell::deserialize(deserializer)? {
        Cell::Text(s) => s.trim().to_string(),
        Cell::Integer(n) => n.to_string(),
        Cell::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{f:.0}"),
        Cell::Float(f) => f.to_string(),
    })
}

/// Load and validate a roster from a YAML (or JSON) file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_roster(path: &Path) -> Result<RosterFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RosterFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_roster(&content)
}

/// Parse and validate roster text.
///
/// # Errors
///
/// Returns `ConfigError` if the text cannot be parsed or fails validation.
pub fn parse_roster(content: &str) -> Result<RosterFile, ConfigError> {
    let roster: RosterFile = serde_yaml::from_str(content).map_err(ConfigError::RosterFileParse)?;
    validate_roster(&roster)?;
    Ok(roster)
}

fn validate_roster(roster: &RosterFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for (index, student) in roster.students.iter().enumerate() {
        if student.roll_number.is_empty() {
            return Err(ConfigError::Validation(format!(
                "row {} has an empty Roll Number",
                index + 1
            )));
        }

        if !seen.insert(student.roll_number.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate Roll Number: '{}'",
                student.roll_number
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "roster_test.rs"]
mod tests;
