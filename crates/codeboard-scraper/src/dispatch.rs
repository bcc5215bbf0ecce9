//! Concurrent fan-out of one individual's profile URLs.

use std::sync::Arc;

use codeboard_core::{AppConfig, Platform, ProfileUrls};
use tracing::Instrument;

use crate::collector::ResultCollector;
use crate::sources::SourceSet;
use crate::types::{FailureKind, FailureRecord, FetchOutcome, ProfileSet, SourceRecord};

#[derive(Debug, Clone)]
pub struct Dispatcher {
    sources: SourceSet,
}

impl Dispatcher {
    #[must_use]
    pub fn new(sources: SourceSet) -> Self {
        Self { sources }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(SourceSet::from_config(config))
    }

    /// Fetches every provided URL concurrently and returns all four records.
    ///
    /// Blank platforms get `{"Total_Score": 0}` without a network call. Each
    /// remaining platform runs on its own task, and this returns only after
    /// every task has finished. A task that panics is recorded as an
    /// `{"Error": ..., "Total_Score": 0}` record for its platform.
    pub async fn dispatch(&self, urls: &ProfileUrls) -> ProfileSet {
        let collector = Arc::new(ResultCollector::new());
        let mut tasks = Vec::with_capacity(Platform::ALL.len());

        for platform in Platform::ALL {
            let Some(url) = urls.get(platform) else {
                collector
                    .record(platform, FetchOutcome::Complete(SourceRecord::blank()))
                    .await;
                continue;
            };

            let Some(source) = self.sources.get(platform) else {
                tracing::warn!(%platform, "no source registered; recording failure");
                collector
                    .record(
                        platform,
                        FetchOutcome::degraded(
                            SourceRecord::Failed(FailureRecord::capitalized(format!(
                                "no source registered for {platform}"
                            ))),
                            FailureKind::Unexpected,
                        ),
                    )
                    .await;
                continue;
            };

            let url = url.to_owned();
            let task_collector = Arc::clone(&collector);
            let span = tracing::debug_span!("source", %platform);
            let handle = tokio::spawn(
                async move {
                    let outcome = source.fetch(&url).await;
                    if let Some(cause) = outcome.cause() {
                        tracing::warn!(%cause, url = %url, "degraded profile record");
                    }
                    task_collector.record(platform, outcome).await;
                }
                .instrument(span),
            );
            tasks.push((platform, handle));
        }

        for (platform, handle) in tasks {
            if let Err(e) = handle.await {
                tracing::error!(%platform, error = %e, "profile task failed");
                collector
                    .record(
                        platform,
                        FetchOutcome::degraded(
                            SourceRecord::Failed(FailureRecord::capitalized(e.to_string())),
                            FailureKind::Unexpected,
                        ),
                    )
                    .await;
            }
        }

        collector.snapshot().await
    }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
