//! CodeChef: contest rating read from the public profile page.

use async_trait::async_trait;
use codeboard_core::Platform;
use scraper::Html;

use super::ProfileSource;
use crate::client::{build_client, element_text, fetch_page, selector};
use crate::error::SourceError;
use crate::score::contest_score;
use crate::types::{FailureRecord, FetchOutcome, RatingProfile, SourceRecord};
use crate::username::resolve_username;

const FETCH_FAILED: &str = "Failed to fetch profile";

pub struct CodeChefSource {
    timeout_secs: u64,
    user_agent: String,
}

impl CodeChefSource {
    #[must_use]
    pub fn new(timeout_secs: u64, user_agent: &str) -> Self {
        Self {
            timeout_secs,
            user_agent: user_agent.to_owned(),
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<RatingProfile, SourceError> {
        let client = build_client(self.timeout_secs, &self.user_agent)?;
        let html = fetch_page(&client, url).await?;
        parse_rating_page(&html)
    }
}

#[async_trait]
impl ProfileSource for CodeChefSource {
    fn platform(&self) -> Platform {
        Platform::CodeChef
    }

    async fn fetch(&self, url: &str) -> FetchOutcome {
        match self.try_fetch(url).await {
            Ok(profile) => {
                tracing::debug!(url, score = profile.total_score, "CodeChef profile parsed");
                FetchOutcome::Complete(SourceRecord::Rating(profile))
            }
            Err(e @ (SourceError::Http(_) | SourceError::UnexpectedStatus { .. })) => {
                tracing::debug!(url, error = %e, "CodeChef profile fetch failed");
                FetchOutcome::degraded(
                    SourceRecord::Failed(FailureRecord::lower(FETCH_FAILED)),
                    e.kind(),
                )
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "CodeChef profile layout not recognized");
                FetchOutcome::degraded(SourceRecord::placeholder(resolve_username(url)), e.kind())
            }
        }
    }
}

/// All four fields must resolve; any miss fails the whole page.
pub(crate) fn parse_rating_page(html: &str) -> Result<RatingProfile, SourceError> {
    let document = Html::parse_document(html);
    let username_sel = selector("span.m-username--link")?;
    let star_sel = selector("span.rating")?;
    let rating_sel = selector("div.rating-number")?;
    let contests_sel = selector("div.contest-participated-count b")?;

    let first_text = |sel: &scraper::Selector, element: &'static str| {
        document
            .select(sel)
            .next()
            .map(element_text)
            .ok_or(SourceError::MissingElement { element })
    };

    let username = first_text(&username_sel, "username")?;
    let star = first_text(&star_sel, "star rating")?;
    let rating = first_text(&rating_sel, "rating number")?;
    let contests_raw = first_text(&contests_sel, "contest count")?;

    let contests_participated =
        contests_raw
            .parse::<u64>()
            .map_err(|_| SourceError::InvalidNumber {
                field: "Contests_Participated",
                value: contests_raw.clone(),
            })?;

    Ok(RatingProfile {
        username,
        star,
        rating,
        contests_participated,
        total_score: contest_score(contests_participated),
    })
}
