//! `rank`: standings computed from a persisted aggregate file.

use std::path::Path;

use anyhow::Context;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankEntry {
    pub roll: String,
    pub score: u64,
    pub sources: usize,
}

/// Print the standings table for the aggregate file at `input`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not an aggregate
/// document.
pub(crate) fn run_rank(input: &Path, limit: Option<usize>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let document: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", input.display()))?;

    let mut entries = rank_document(&document)?;
    if let Some(limit) = limit {
        entries.truncate(limit);
    }

    if entries.is_empty() {
        println!(
            "no students found in {}; run `collect` first",
            input.display()
        );
        return Ok(());
    }

    println!("{:<6}{:<16}{:>8}  SOURCES", "RANK", "ROLL", "SCORE");
    for (index, entry) in entries.iter().enumerate() {
        println!(
            "{:<6}{:<16}{:>8}  {}",
            index + 1,
            entry.roll,
            entry.score,
            entry.sources
        );
    }

    Ok(())
}

/// Combined score per student, highest first; ties go to the lower roll.
///
/// `sources` counts the platforms that contributed a non-zero score.
pub(crate) fn rank_document(document: &Value) -> anyhow::Result<Vec<RankEntry>> {
    let students = document
        .get("Profiles")
        .and_then(Value::as_object)
        .context("aggregate document has no top-level \"Profiles\" object")?;

    let mut entries: Vec<RankEntry> = students
        .iter()
        .map(|(roll, student)| {
            let scores: Vec<u64> = student
                .get("Profiles")
                .and_then(Value::as_object)
                .map(|records| records.values().map(record_score).collect())
                .unwrap_or_default();
            RankEntry {
                roll: roll.clone(),
                score: scores.iter().fold(0u64, |acc, s| acc.saturating_add(*s)),
                sources: scores.iter().filter(|s| **s > 0).count(),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.roll.cmp(&b.roll)));
    Ok(entries)
}

/// `Total_Score`, or the older `Total Score` key. Anything non-numeric is 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn record_score(record: &Value) -> u64 {
    let Some(value) = record
        .get("Total_Score")
        .or_else(|| record.get("Total Score"))
    else {
        return 0;
    };
    if let Some(n) = value.as_u64() {
        return n;
    }
    match value.as_f64() {
        Some(f) if f.is_finite() && f > 0.0 => f as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(roll: &str, score: u64, sources: usize) -> RankEntry {
        RankEntry {
            roll: roll.to_string(),
            score,
            sources,
        }
    }

    #[test]
    fn sums_sources_and_sorts_descending() {
        let doc = json!({"Profiles": {
            "21A01": {"Profiles": {
                "GeeksForGeeks": {"Total_Score": 10},
                "LeetCode": {"Total_Score": 22}
            }},
            "21A02": {"Profiles": {
                "CodeChef": {"Total_Score": 40},
                "HackerRank": {"error": "Invalid URL", "Total_Score": 0}
            }}
        }});
        assert_eq!(
            rank_document(&doc).unwrap(),
            vec![entry("21A02", 40, 1), entry("21A01", 32, 2)]
        );
    }

    #[test]
    fn ties_break_on_roll_ascending() {
        let doc = json!({"Profiles": {
            "B": {"Profiles": {"CodeChef": {"Total_Score": 4}}},
            "A": {"Profiles": {"LeetCode": {"Total_Score": 4}}},
            "C": {"Profiles": {}}
        }});
        let rolls: Vec<String> = rank_document(&doc)
            .unwrap()
            .into_iter()
            .map(|e| e.roll)
            .collect();
        assert_eq!(rolls, vec!["A", "B", "C"]);
    }

    #[test]
    fn legacy_key_and_non_numeric_values() {
        let doc = json!({"Profiles": {
            "X": {"Profiles": {
                "GeeksForGeeks": {"Total Score": 6},
                "CodeChef": {"Total_Score": "__"},
                "HackerRank": {"Total_Score": 2.0},
                "LeetCode": {"Username": "x"}
            }}
        }});
        assert_eq!(rank_document(&doc).unwrap(), vec![entry("X", 8, 2)]);
    }

    #[test]
    fn missing_profiles_object_is_an_error() {
        assert!(rank_document(&json!({"students": {}})).is_err());
        assert!(rank_document(&json!([1, 2])).is_err());
    }

    #[test]
    fn student_without_profiles_scores_zero() {
        let doc = json!({"Profiles": {"Z": {}}});
        assert_eq!(rank_document(&doc).unwrap(), vec![entry("Z", 0, 0)]);
    }

    #[test]
    fn run_rank_reports_unreadable_file() {
        let path = std::env::temp_dir().join(format!(
            "codeboard-rank-missing-{}.json",
            std::process::id()
        ));
        let err = run_rank(&path, None).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
