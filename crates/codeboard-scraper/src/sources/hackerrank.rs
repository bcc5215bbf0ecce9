//! HackerRank: badges and certifications scraped from the public profile page.

use async_trait::async_trait;
use codeboard_core::Platform;
use scraper::Html;

use super::ProfileSource;
use crate::client::{build_client, element_text, fetch_page, selector};
use crate::error::SourceError;
use crate::types::{
    Badge, BadgeProfile, FailureKind, FailureRecord, FetchOutcome, SourceRecord, UNKNOWN_USER,
};
use crate::username::resolve_username;

const INVALID_URL: &str = "Invalid URL";
const UNKNOWN_BADGE: &str = "Unknown Badge";

pub struct HackerRankSource {
    timeout_secs: u64,
    user_agent: String,
}

impl HackerRankSource {
    #[must_use]
    pub fn new(timeout_secs: u64, user_agent: &str) -> Self {
        Self {
            timeout_secs,
            user_agent: user_agent.to_owned(),
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<BadgeProfile, SourceError> {
        let client = build_client(self.timeout_secs, &self.user_agent)?;
        let html = fetch_page(&client, url).await?;
        parse_badge_page(&html)
    }
}

#[async_trait]
impl ProfileSource for HackerRankSource {
    fn platform(&self) -> Platform {
        Platform::HackerRank
    }

    async fn fetch(&self, url: &str) -> FetchOutcome {
        fold_outcome(url, self.try_fetch(url).await)
    }
}

/// Maps a fetch-and-parse result onto the HackerRank record shapes.
///
/// Parsing itself never fails on odd markup, so the final arm only runs when
/// a selector is rejected by the CSS parser.
fn fold_outcome(url: &str, result: Result<BadgeProfile, SourceError>) -> FetchOutcome {
    match result {
        Ok(profile) if profile.badges.is_empty() && profile.certifications.is_empty() => {
            FetchOutcome::degraded(
                SourceRecord::placeholder(resolve_username(url)),
                FailureKind::EmptyProfile,
            )
        }
        Ok(profile) => FetchOutcome::Complete(SourceRecord::Badges(profile)),
        Err(e @ (SourceError::Http(_) | SourceError::UnexpectedStatus { .. })) => {
            tracing::debug!(url, error = %e, "HackerRank profile fetch failed");
            FetchOutcome::degraded(
                SourceRecord::Failed(FailureRecord::lower(INVALID_URL)),
                e.kind(),
            )
        }
        Err(e) => {
            tracing::debug!(url, error = %e, "HackerRank profile parse failed");
            FetchOutcome::degraded(SourceRecord::placeholder(UNKNOWN_USER), FailureKind::Unexpected)
        }
    }
}

/// Extracts badges (hexagon icons) and certification headings.
///
/// `Total_Score` is the sum of stars across all badges. An empty result is
/// not an error here; the caller decides what an empty profile means.
pub(crate) fn parse_badge_page(html: &str) -> Result<BadgeProfile, SourceError> {
    let document = Html::parse_document(html);
    let hexagon = selector("svg.hexagon")?;
    let title = selector("text.badge-title")?;
    let star_section = selector("g.star-section")?;
    let star = selector("svg.badge-star")?;
    let certificate = selector("h2.certificate_v3-heading")?;

    let badges: Vec<Badge> = document
        .select(&hexagon)
        .map(|container| {
            let name = container
                .select(&title)
                .next()
                .map_or_else(|| UNKNOWN_BADGE.to_string(), element_text);
            let stars = container
                .select(&star_section)
                .next()
                .map_or(0, |section| section.select(&star).count() as u64);
            Badge { name, stars }
        })
        .collect();

    let certifications = document
        .select(&certificate)
        .map(element_text)
        .collect();

    let total_score = badges
        .iter()
        .fold(0u64, |acc, b| acc.saturating_add(b.stars));

    Ok(BadgeProfile {
        badges,
        certifications,
        total_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"
<html><body>
  <div class="hacker-badges">
    <svg class="hexagon" viewBox="0 0 10 10">
      <text class="badge-title">Problem Solving</text>
      <g class="star-section">
        <svg class="badge-star"></svg>
        <svg class="badge-star"></svg>
        <svg class="badge-star"></svg>
      </g>
    </svg>
    <svg class="hexagon">
      <text class="badge-title"> Python </text>
      <g class="star-section"><svg class="badge-star"></svg></g>
    </svg>
    <svg class="hexagon"><g class="other"></g></svg>
  </div>
  <h2 class="certificate_v3-heading"> Java (Basic) </h2>
  <h2 class="certificate_v3-heading">SQL (Intermediate)</h2>
</body></html>"#;

    #[test]
    fn counts_stars_per_badge_and_sums_them() {
        let profile = parse_badge_page(PROFILE).unwrap();
        assert_eq!(
            profile.badges,
            vec![
                Badge {
                    name: "Problem Solving".to_string(),
                    stars: 3
                },
                Badge {
                    name: "Python".to_string(),
                    stars: 1
                },
                Badge {
                    name: "Unknown Badge".to_string(),
                    stars: 0
                },
            ]
        );
        assert_eq!(profile.total_score, 4);
    }

    #[test]
    fn certifications_are_trimmed_in_order() {
        let profile = parse_badge_page(PROFILE).unwrap();
        assert_eq!(
            profile.certifications,
            vec!["Java (Basic)".to_string(), "SQL (Intermediate)".to_string()]
        );
    }

    #[test]
    fn page_without_badges_or_certifications_is_empty() {
        let profile = parse_badge_page("<html><body><p>nothing</p></body></html>").unwrap();
        assert!(profile.badges.is_empty());
        assert!(profile.certifications.is_empty());
        assert_eq!(profile.total_score, 0);
    }

    #[test]
    fn certifications_alone_score_zero() {
        let html = r#"<h2 class="certificate_v3-heading">Problem Solving (Basic)</h2>"#;
        let profile = parse_badge_page(html).unwrap();
        assert_eq!(profile.certifications.len(), 1);
        assert_eq!(profile.total_score, 0);
    }

    #[test]
    fn malformed_markup_does_not_fail() {
        let profile = parse_badge_page("<svg class=\"hexagon\"><text class=\"badge-title\">C").unwrap();
        assert_eq!(profile.badges.len(), 1);
        assert_eq!(profile.badges[0].name, "C");
    }

    #[test]
    fn selector_failure_reports_unknown_user() {
        let err = selector("svg..hexagon").unwrap_err();
        let outcome = fold_outcome("https://www.hackerrank.com/profile/asha/", Err(err));
        assert_eq!(outcome.cause(), Some(FailureKind::Unexpected));
        assert_eq!(
            serde_json::to_value(outcome.record()).unwrap()["Username"],
            "unknown"
        );
    }
}
