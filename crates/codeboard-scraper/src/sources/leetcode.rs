//! LeetCode: accepted-problem counts and contest ranking via GraphQL.
//!
//! Every failure collapses to [`JudgeProfile::zeroed`] carrying the username
//! resolved from the URL, so the record shape never changes.

use async_trait::async_trait;
use codeboard_core::Platform;
use serde::Deserialize;

use super::ProfileSource;
use crate::client::build_client;
use crate::error::SourceError;
use crate::score::{contest_score, DifficultyCounts};
use crate::types::{FailureKind, FetchOutcome, JudgeProfile, SourceRecord, NOT_AVAILABLE};
use crate::username::resolve_username;

const PROFILE_QUERY: &str = "query userProfile($username: String!) {
  matchedUser(username: $username) {
    submitStats {
      acSubmissionNum {
        difficulty
        count
      }
    }
  }
  userContestRanking(username: $username) {
    attendedContestsCount
    rating
  }
}";

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ProfileData>,
    errors: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileData {
    matched_user: Option<MatchedUser>,
    user_contest_ranking: Option<ContestRanking>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedUser {
    submit_stats: Option<SubmitStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
    ac_submission_num: Option<Vec<Option<SubmissionCount>>>,
}

#[derive(Debug, Deserialize)]
struct SubmissionCount {
    difficulty: Option<String>,
    count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContestRanking {
    attended_contests_count: Option<u64>,
    rating: Option<f64>,
}

pub struct LeetCodeSource {
    timeout_secs: u64,
    user_agent: String,
    graphql_url: String,
}

impl LeetCodeSource {
    #[must_use]
    pub fn new(timeout_secs: u64, user_agent: &str, graphql_url: &str) -> Self {
        Self {
            timeout_secs,
            user_agent: user_agent.to_owned(),
            graphql_url: graphql_url.to_owned(),
        }
    }

    async fn query_profile(&self, username: &str) -> Result<ProfileData, SourceError> {
        let client = build_client(self.timeout_secs, &self.user_agent)?;
        let body = serde_json::json!({
            "query": PROFILE_QUERY,
            "variables": { "username": username },
        });

        let response = client
            .post(&self.graphql_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.graphql_url.clone(),
            });
        }

        let text = response.text().await?;
        let parsed: GraphQlResponse =
            serde_json::from_str(&text).map_err(|source| SourceError::Deserialize {
                context: format!("LeetCode profile for {username}"),
                source,
            })?;

        // `"errors": null` deserializes to `None` and is not a failure.
        if let Some(errors) = parsed.errors {
            return Err(SourceError::Query(errors.to_string()));
        }

        Ok(parsed.data.unwrap_or_default())
    }
}

#[async_trait]
impl ProfileSource for LeetCodeSource {
    fn platform(&self) -> Platform {
        Platform::LeetCode
    }

    async fn fetch(&self, url: &str) -> FetchOutcome {
        let username = resolve_username(url);
        if username == NOT_AVAILABLE {
            return FetchOutcome::degraded(
                SourceRecord::Judge(JudgeProfile::zeroed(username)),
                FailureKind::UnresolvedUsername,
            );
        }

        match self.query_profile(&username).await {
            Ok(data) => match summarize(&username, data) {
                Some(profile) => {
                    tracing::debug!(
                        username = %username,
                        score = profile.total_score,
                        "LeetCode profile fetched"
                    );
                    FetchOutcome::Complete(SourceRecord::Judge(profile))
                }
                None => FetchOutcome::degraded(
                    SourceRecord::Judge(JudgeProfile::zeroed(username)),
                    FailureKind::EmptyProfile,
                ),
            },
            Err(e) => {
                tracing::debug!(username = %username, error = %e, "LeetCode query failed");
                FetchOutcome::degraded(
                    SourceRecord::Judge(JudgeProfile::zeroed(username)),
                    e.kind(),
                )
            }
        }
    }
}

/// Builds the record from query data; `None` when neither the user nor a
/// contest ranking came back.
///
/// `Total` is Easy + Medium + Hard, never the server's `All` entry. When a
/// difficulty appears more than once the last entry wins.
fn summarize(username: &str, data: ProfileData) -> Option<JudgeProfile> {
    if data.matched_user.is_none() && data.user_contest_ranking.is_none() {
        return None;
    }

    let mut counts = DifficultyCounts::default();
    let submissions = data
        .matched_user
        .and_then(|user| user.submit_stats)
        .and_then(|stats| stats.ac_submission_num)
        .unwrap_or_default();
    for entry in submissions.into_iter().flatten() {
        let count = entry.count.unwrap_or(0);
        match entry.difficulty.as_deref() {
            Some("Easy") => counts.easy = count,
            Some("Medium") => counts.medium = count,
            Some("Hard") => counts.hard = count,
            _ => {}
        }
    }

    let (contests_attended, rating) = data.user_contest_ranking.map_or((0, 0.0), |ranking| {
        (
            ranking.attended_contests_count.unwrap_or(0),
            ranking.rating.unwrap_or(0.0),
        )
    });

    Some(JudgeProfile {
        username: username.to_owned(),
        problems: counts.with_total(),
        total_score: counts
            .weighted_score()
            .saturating_add(contest_score(contests_attended)),
        contests_attended,
        rating,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(json: &str) -> ProfileData {
        let parsed: GraphQlResponse = serde_json::from_str(json).unwrap();
        parsed.data.unwrap_or_default()
    }

    #[test]
    fn judge_example_scores_twenty_two() {
        let profile = summarize(
            "alice",
            data(
                r#"{"data":{
                    "matchedUser":{"submitStats":{"acSubmissionNum":[
                        {"difficulty":"All","count":10},
                        {"difficulty":"Easy","count":5},
                        {"difficulty":"Medium","count":4},
                        {"difficulty":"Hard","count":1}
                    ]}},
                    "userContestRanking":{"attendedContestsCount":3,"rating":1523.4}
                }}"#,
            ),
        )
        .unwrap();
        assert_eq!(profile.problems.counts, DifficultyCounts::new(5, 4, 1));
        assert_eq!(profile.problems.total, 10);
        assert_eq!(profile.total_score, 22);
        assert_eq!(profile.contests_attended, 3);
        assert!((profile.rating - 1523.4).abs() < f64::EPSILON);
    }

    #[test]
    fn total_ignores_server_all_entry() {
        let profile = summarize(
            "bob",
            data(
                r#"{"data":{"matchedUser":{"submitStats":{"acSubmissionNum":[
                    {"difficulty":"All","count":99},
                    {"difficulty":"Easy","count":2}
                ]}},"userContestRanking":null}}"#,
            ),
        )
        .unwrap();
        assert_eq!(profile.problems.total, 2);
        assert_eq!(profile.total_score, 2);
    }

    #[test]
    fn null_contest_ranking_defaults_to_zero() {
        let profile = summarize(
            "carol",
            data(
                r#"{"data":{"matchedUser":{"submitStats":{"acSubmissionNum":[
                    {"difficulty":"Hard","count":2}
                ]}},"userContestRanking":null}}"#,
            ),
        )
        .unwrap();
        assert_eq!(profile.contests_attended, 0);
        assert!(profile.rating.abs() < f64::EPSILON);
        assert_eq!(profile.total_score, 6);
    }

    #[test]
    fn null_fields_inside_ranking_default_to_zero() {
        let profile = summarize(
            "dan",
            data(
                r#"{"data":{"matchedUser":{"submitStats":null},
                    "userContestRanking":{"attendedContestsCount":null,"rating":null}}}"#,
            ),
        )
        .unwrap();
        assert_eq!(profile.total_score, 0);
        assert_eq!(profile.problems.total, 0);
    }

    #[test]
    fn contest_only_still_scores() {
        let profile = summarize(
            "erin",
            data(
                r#"{"data":{"matchedUser":null,
                    "userContestRanking":{"attendedContestsCount":4,"rating":1400.0}}}"#,
            ),
        )
        .unwrap();
        assert_eq!(profile.total_score, 8);
    }

    #[test]
    fn no_user_and_no_contest_is_empty() {
        assert!(summarize(
            "ghost",
            data(r#"{"data":{"matchedUser":null,"userContestRanking":null}}"#)
        )
        .is_none());
        assert!(summarize("ghost", data("{}")).is_none());
    }

    #[test]
    fn null_submission_entries_are_skipped() {
        let profile = summarize(
            "fay",
            data(
                r#"{"data":{"matchedUser":{"submitStats":{"acSubmissionNum":[
                    null,
                    {"difficulty":"Medium","count":3},
                    {"difficulty":null,"count":7},
                    {"difficulty":"Easy"}
                ]}}}}"#,
            ),
        )
        .unwrap();
        assert_eq!(profile.problems.counts, DifficultyCounts::new(0, 3, 0));
        assert_eq!(profile.total_score, 6);
    }

    #[test]
    fn query_uses_variables_not_interpolation() {
        assert!(PROFILE_QUERY.contains("$username: String!"));
        assert!(!PROFILE_QUERY.contains('"'));
    }
}
