//! GeeksforGeeks: coding score and per-difficulty solved counts.

use async_trait::async_trait;
use codeboard_core::Platform;
use scraper::Html;

use super::ProfileSource;
use crate::client::{build_client, element_text, fetch_page, selector};
use crate::error::SourceError;
use crate::score::DifficultyCounts;
use crate::types::{ArchiveProfile, FailureRecord, FetchOutcome, SourceRecord, NOT_AVAILABLE};

const INACCESSIBLE: &str = "Invalid or inaccessible URL";
const UNEXPECTED: &str = "An unexpected error occurred";

const USERNAME_CLASS: &str = "div.profilePicSection_head_userHandle__oOfFy";
const SCORE_CARD_CLASS: &str = "div.scoreCard_head_left--score__oSi_x";
const NAV_LABEL_CLASS: &str = "div.problemNavbar_head_nav--text__UaGCx";

pub struct GfgSource {
    timeout_secs: u64,
    user_agent: String,
}

impl GfgSource {
    #[must_use]
    pub fn new(timeout_secs: u64, user_agent: &str) -> Self {
        Self {
            timeout_secs,
            user_agent: user_agent.to_owned(),
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<ArchiveProfile, SourceError> {
        let client = build_client(self.timeout_secs, &self.user_agent)?;
        let html = fetch_page(&client, url).await?;
        parse_archive_page(&html)
    }
}

#[async_trait]
impl ProfileSource for GfgSource {
    fn platform(&self) -> Platform {
        Platform::GeeksForGeeks
    }

    async fn fetch(&self, url: &str) -> FetchOutcome {
        let err = match self.try_fetch(url).await {
            Ok(profile) => {
                tracing::debug!(
                    url,
                    score = profile.total_score,
                    solved_summary = %profile.solved_summary,
                    "GeeksforGeeks profile parsed"
                );
                return FetchOutcome::Complete(SourceRecord::Archive(profile));
            }
            Err(e) => e,
        };

        tracing::debug!(url, error = %err, "GeeksforGeeks profile failed");
        let message = match &err {
            SourceError::Http(_) | SourceError::UnexpectedStatus { .. } => INACCESSIBLE.to_string(),
            SourceError::MissingElement { .. } | SourceError::InvalidNumber { .. } => {
                err.to_string()
            }
            _ => UNEXPECTED.to_string(),
        };
        FetchOutcome::degraded(
            SourceRecord::Failed(FailureRecord::capitalized(message)),
            err.kind(),
        )
    }
}

/// Difficulty tiers that appear on the problem navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyLabel {
    School,
    Basic,
    Easy,
    Medium,
    Hard,
}

impl DifficultyLabel {
    fn from_category(category: &str) -> Option<Self> {
        match category.trim().to_ascii_uppercase().as_str() {
            "SCHOOL" => Some(Self::School),
            "BASIC" => Some(Self::Basic),
            "EASY" => Some(Self::Easy),
            "MEDIUM" => Some(Self::Medium),
            "HARD" => Some(Self::Hard),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::School => "School",
            Self::Basic => "Basic",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Parses a navigation label of the form `<CATEGORY> (<count>)`.
///
/// Category matching is case-insensitive. Text without a parenthesised count,
/// or with an unknown category, yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`SourceError::InvalidNumber`] when the category is known but the
/// count is not a non-negative integer.
pub fn parse_difficulty_label(
    text: &str,
) -> Result<Option<(DifficultyLabel, u64)>, SourceError> {
    let Some((category, rest)) = text.trim().rsplit_once(" (") else {
        return Ok(None);
    };
    let Some(raw) = rest.strip_suffix(')') else {
        return Ok(None);
    };
    let Some(label) = DifficultyLabel::from_category(category) else {
        return Ok(None);
    };
    let count = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| SourceError::InvalidNumber {
            field: label.name(),
            value: raw.trim().to_string(),
        })?;
    Ok(Some((label, count)))
}

pub(crate) fn parse_archive_page(html: &str) -> Result<ArchiveProfile, SourceError> {
    let document = Html::parse_document(html);
    let username_sel = selector(USERNAME_CLASS)?;
    let score_sel = selector(SCORE_CARD_CLASS)?;
    let nav_sel = selector(NAV_LABEL_CLASS)?;

    let username = document
        .select(&username_sel)
        .next()
        .map(element_text)
        .ok_or(SourceError::MissingElement {
            element: "Username",
        })?;

    let mut scores = document.select(&score_sel).map(element_text);
    let coding_score = scores.next().unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let solved_summary = scores.next().unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let (mut school, mut basic) = (0u64, 0u64);
    let mut counts = DifficultyCounts::default();
    for el in document.select(&nav_sel) {
        let Some((label, count)) = parse_difficulty_label(&element_text(el))? else {
            continue;
        };
        match label {
            DifficultyLabel::School => school = count,
            DifficultyLabel::Basic => basic = count,
            DifficultyLabel::Easy => counts.easy = count,
            DifficultyLabel::Medium => counts.medium = count,
            DifficultyLabel::Hard => counts.hard = count,
        }
    }

    Ok(ArchiveProfile {
        username,
        coding_score,
        solved_summary,
        total_problems_solved: school.saturating_add(basic).saturating_add(counts.total()),
        problems_by_difficulty: counts,
        total_score: counts.weighted_score(),
    })
}

#[cfg(test)]
#[path = "gfg_test.rs"]
mod tests;
