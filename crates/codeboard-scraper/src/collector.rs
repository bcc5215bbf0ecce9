//! Per-individual result collector.
//!
//! A fresh collector is created for every dispatch, so the lock is only ever
//! contended by one individual's source tasks.

use std::collections::BTreeMap;

use codeboard_core::Platform;
use tokio::sync::Mutex;

use crate::types::{FetchOutcome, ProfileSet};

#[derive(Debug, Default)]
pub struct ResultCollector {
    entries: Mutex<BTreeMap<Platform, FetchOutcome>>,
}

impl ResultCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the outcome for `platform`.
    ///
    /// Each platform is written once per individual. A second write is
    /// rejected and logged; the first outcome is kept. Returns whether the
    /// write was accepted.
    pub async fn record(&self, platform: Platform, outcome: FetchOutcome) -> bool {
        let mut entries = self.entries.lock().await;
        if entries.contains_key(&platform) {
            tracing::warn!(%platform, "duplicate result for platform ignored");
            return false;
        }
        entries.insert(platform, outcome);
        true
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Copies the stored outcomes into the serializable per-individual set.
    pub async fn snapshot(&self) -> ProfileSet {
        let entries = self.entries.lock().await;
        let mut set = ProfileSet::default();
        for (&platform, outcome) in entries.iter() {
            if let Some(cause) = outcome.cause() {
                set.degraded.insert(platform, cause);
            }
            set.profiles.insert(platform, outcome.record().clone());
        }
        set
    }
}
