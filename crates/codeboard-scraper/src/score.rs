//! Difficulty-weighted scoring shared by the problem-count sources.

use serde::Serialize;

pub const EASY_WEIGHT: u64 = 1;
pub const MEDIUM_WEIGHT: u64 = 2;
pub const HARD_WEIGHT: u64 = 3;
/// Points per rated contest attended, on both CodeChef and LeetCode.
pub const CONTEST_WEIGHT: u64 = 2;

/// Solved-problem counts for the three weighted difficulties.
///
/// Serializes as `{"Easy", "Medium", "Hard"}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyCounts {
    #[serde(rename = "Easy")]
    pub easy: u64,
    #[serde(rename = "Medium")]
    pub medium: u64,
    #[serde(rename = "Hard")]
    pub hard: u64,
}

impl DifficultyCounts {
    #[must_use]
    pub fn new(easy: u64, medium: u64, hard: u64) -> Self {
        Self { easy, medium, hard }
    }

    /// `Easy×1 + Medium×2 + Hard×3`.
    #[must_use]
    pub fn weighted_score(&self) -> u64 {
        self.easy
            .saturating_mul(EASY_WEIGHT)
            .saturating_add(self.medium.saturating_mul(MEDIUM_WEIGHT))
            .saturating_add(self.hard.saturating_mul(HARD_WEIGHT))
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.easy
            .saturating_add(self.medium)
            .saturating_add(self.hard)
    }

    #[must_use]
    pub fn with_total(self) -> DifficultyTotals {
        DifficultyTotals {
            total: self.total(),
            counts: self,
        }
    }
}

/// [`DifficultyCounts`] plus a `Total` equal to their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyTotals {
    #[serde(flatten)]
    pub counts: DifficultyCounts,
    #[serde(rename = "Total")]
    pub total: u64,
}

#[must_use]
pub fn contest_score(contests: u64) -> u64 {
    contests.saturating_mul(CONTEST_WEIGHT)
}
