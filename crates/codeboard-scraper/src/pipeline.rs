//! Roster-wide aggregation.

use std::collections::BTreeMap;

use codeboard_core::{AppConfig, StudentRow};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::Instrument;

use crate::dispatch::Dispatcher;
use crate::types::ProfileSet;

/// Aggregate records keyed by roll identifier.
///
/// Serializes as `{"Profiles": {roll: {"Profiles": {...}}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterReport {
    #[serde(rename = "Profiles")]
    pub students: BTreeMap<String, ProfileSet>,
}

impl RosterReport {
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Number of source records, across all individuals, that are degraded.
    #[must_use]
    pub fn degraded_count(&self) -> usize {
        self.students.values().map(|set| set.degraded.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct ProfilePipeline {
    dispatcher: Dispatcher,
    max_concurrent_students: usize,
}

impl ProfilePipeline {
    /// `max_concurrent_students` of `0` is treated as `1`.
    #[must_use]
    pub fn new(dispatcher: Dispatcher, max_concurrent_students: usize) -> Self {
        Self {
            dispatcher,
            max_concurrent_students: max_concurrent_students.max(1),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Dispatcher::from_config(config),
            config.max_concurrent_students,
        )
    }

    /// Dispatches every row and collects the results by roll identifier.
    ///
    /// Individual source failures never abort the run; they are already
    /// folded into degraded records by the time they reach here.
    pub async fn run(&self, rows: &[StudentRow]) -> RosterReport {
        let results: Vec<(String, ProfileSet)> = stream::iter(rows)
            .map(|row| {
                let span = tracing::info_span!("student", roll = %row.roll_number);
                let urls = row.profile_urls();
                async move {
                    let set = self.dispatcher.dispatch(&urls).await;
                    tracing::info!(
                        score = set.combined_score(),
                        degraded = set.degraded.len(),
                        "profiles aggregated"
                    );
                    (row.roll_number.clone(), set)
                }
                .instrument(span)
            })
            .buffer_unordered(self.max_concurrent_students)
            .collect()
            .await;

        RosterReport {
            students: results.into_iter().collect(),
        }
    }
}
