//! Normalized per-source records.
//!
//! Every shape carries `Total_Score`. Degraded records keep the same keys as
//! their successful counterparts and signal "unknown" through sentinel values
//! (`"__"`, `"N/A"`, `"unknown"`) rather than missing fields, so consumers can
//! always read `Total_Score` without source-specific handling.

use std::collections::BTreeMap;

use codeboard_core::Platform;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::score::{DifficultyCounts, DifficultyTotals};

/// Username when the URL yields no usable path segment.
pub const NOT_AVAILABLE: &str = "N/A";
/// Username when a page failed in a way that left no identity to report.
pub const UNKNOWN_USER: &str = "unknown";
/// Placeholder for a score or solved-count field that could not be read.
pub const MISSING_STAT: &str = "__";

/// Why a source returned a degraded record instead of real statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Connection, timeout, DNS or body-read failure.
    Transport,
    /// Non-success HTTP status.
    Status,
    /// An expected element was missing or unreadable.
    StructuralParse,
    /// GraphQL error list or malformed payload.
    Query,
    /// The page or query succeeded but held no statistics.
    EmptyProfile,
    /// No username could be derived from the URL.
    UnresolvedUsername,
    /// Anything else, including a fetch task that panicked.
    Unexpected,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FailureKind::Transport => "transport",
            FailureKind::Status => "status",
            FailureKind::StructuralParse => "structural_parse",
            FailureKind::Query => "query",
            FailureKind::EmptyProfile => "empty_profile",
            FailureKind::UnresolvedUsername => "unresolved_username",
            FailureKind::Unexpected => "unexpected",
        };
        f.write_str(label)
    }
}

/// Result of one source fetch. Sources never fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Complete(SourceRecord),
    Degraded {
        record: SourceRecord,
        cause: FailureKind,
    },
}

impl FetchOutcome {
    #[must_use]
    pub fn degraded(record: SourceRecord, cause: FailureKind) -> Self {
        FetchOutcome::Degraded { record, cause }
    }

    #[must_use]
    pub fn record(&self) -> &SourceRecord {
        match self {
            FetchOutcome::Complete(record) | FetchOutcome::Degraded { record, .. } => record,
        }
    }

    #[must_use]
    pub fn cause(&self) -> Option<FailureKind> {
        match self {
            FetchOutcome::Complete(_) => None,
            FetchOutcome::Degraded { cause, .. } => Some(*cause),
        }
    }

    #[must_use]
    pub fn into_record(self) -> SourceRecord {
        match self {
            FetchOutcome::Complete(record) | FetchOutcome::Degraded { record, .. } => record,
        }
    }
}

/// The normalized output of one source for one individual.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum SourceRecord {
    /// URL was not provided; no fetch was attempted.
    Blank(BlankRecord),
    Badges(BadgeProfile),
    Rating(RatingProfile),
    Archive(ArchiveProfile),
    Judge(JudgeProfile),
    /// Schema-complete stand-in with sentinel stats and zero score.
    Placeholder(PlaceholderProfile),
    Failed(FailureRecord),
}

impl SourceRecord {
    #[must_use]
    pub fn blank() -> Self {
        SourceRecord::Blank(BlankRecord::default())
    }

    #[must_use]
    pub fn placeholder(username: impl Into<String>) -> Self {
        SourceRecord::Placeholder(PlaceholderProfile::for_username(username))
    }

    #[must_use]
    pub fn total_score(&self) -> u64 {
        match self {
            SourceRecord::Blank(r) => r.total_score,
            SourceRecord::Badges(r) => r.total_score,
            SourceRecord::Rating(r) => r.total_score,
            SourceRecord::Archive(r) => r.total_score,
            SourceRecord::Judge(r) => r.total_score,
            SourceRecord::Placeholder(r) => r.total_score,
            SourceRecord::Failed(_) => 0,
        }
    }
}

/// Serializes as `{"Total_Score": 0}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct BlankRecord {
    #[serde(rename = "Total_Score")]
    total_score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Badge {
    pub name: String,
    pub stars: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BadgeProfile {
    #[serde(rename = "Badges")]
    pub badges: Vec<Badge>,
    #[serde(rename = "Certifications")]
    pub certifications: Vec<String>,
    #[serde(rename = "Total_Score")]
    pub total_score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RatingProfile {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Star")]
    pub star: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Contests_Participated")]
    pub contests_participated: u64,
    #[serde(rename = "Total_Score")]
    pub total_score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ArchiveProfile {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Coding_Score")]
    pub coding_score: String,
    /// Second score card on the page. Kept for logging; `Total_Problems_Solved`
    /// is recomputed from the difficulty breakdown instead.
    #[serde(skip)]
    pub solved_summary: String,
    /// School + Basic + Easy + Medium + Hard.
    #[serde(rename = "Total_Problems_Solved")]
    pub total_problems_solved: u64,
    #[serde(rename = "Problems_by_Difficulty")]
    pub problems_by_difficulty: DifficultyCounts,
    #[serde(rename = "Total_Score")]
    pub total_score: u64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct JudgeProfile {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Problems")]
    pub problems: DifficultyTotals,
    #[serde(rename = "Total_Score")]
    pub total_score: u64,
    #[serde(rename = "Contests_Attended")]
    pub contests_attended: u64,
    /// Contest rating; serialized as the integer `0` when there is none.
    #[serde(rename = "Rating", serialize_with = "serialize_rating")]
    pub rating: f64,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_rating<S: Serializer>(rating: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if rating.abs() < f64::EPSILON {
        serializer.serialize_u64(0)
    } else {
        serializer.serialize_f64(*rating)
    }
}

impl JudgeProfile {
    /// All-zero record that still names the user.
    #[must_use]
    pub fn zeroed(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            problems: DifficultyTotals::default(),
            total_score: 0,
            contests_attended: 0,
            rating: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PlaceholderProfile {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Coding_Score")]
    pub coding_score: String,
    #[serde(rename = "Problems_Solved")]
    pub problems_solved: String,
    #[serde(rename = "Problems_by_Difficulty")]
    pub problems_by_difficulty: DifficultyTotals,
    #[serde(rename = "Total_Score")]
    pub total_score: u64,
}

impl PlaceholderProfile {
    #[must_use]
    pub fn for_username(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            coding_score: MISSING_STAT.to_string(),
            problems_solved: MISSING_STAT.to_string(),
            problems_by_difficulty: DifficultyTotals::default(),
            total_score: 0,
        }
    }
}

/// Which casing the error key uses in the serialized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKey {
    /// `"error"`: HackerRank and CodeChef.
    Lower,
    /// `"Error"`: GeeksforGeeks and the dispatcher's panic guard.
    Capitalized,
}

/// Serializes as `{"error"|"Error": message, "Total_Score": 0}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub message: String,
    pub key: ErrorKey,
}

impl FailureRecord {
    #[must_use]
    pub fn lower(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            key: ErrorKey::Lower,
        }
    }

    #[must_use]
    pub fn capitalized(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            key: ErrorKey::Capitalized,
        }
    }
}

impl Serialize for FailureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let key = match self.key {
            ErrorKey::Lower => "error",
            ErrorKey::Capitalized => "Error",
        };
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(key, &self.message)?;
        map.serialize_entry("Total_Score", &0u64)?;
        map.end()
    }
}

/// One individual's records, keyed by platform.
///
/// Serializes as `{"Profiles": {"GeeksForGeeks": ..., ...}}`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ProfileSet {
    #[serde(rename = "Profiles")]
    pub profiles: BTreeMap<Platform, SourceRecord>,
    /// Platforms whose record is degraded, with the reason.
    #[serde(skip)]
    pub degraded: BTreeMap<Platform, FailureKind>,
}

impl ProfileSet {
    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<&SourceRecord> {
        self.profiles.get(&platform)
    }

    /// Sum of `Total_Score` across every platform.
    #[must_use]
    pub fn combined_score(&self) -> u64 {
        self.profiles
            .values()
            .fold(0u64, |acc, r| acc.saturating_add(r.total_score()))
    }
}
