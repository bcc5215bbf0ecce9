//! Profile sources, one per platform.

mod codechef;
mod gfg;
mod hackerrank;
mod leetcode;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use codeboard_core::{AppConfig, Platform};

use crate::types::FetchOutcome;

pub use codechef::CodeChefSource;
pub use gfg::{parse_difficulty_label, DifficultyLabel, GfgSource};
pub use hackerrank::HackerRankSource;
pub use leetcode::LeetCodeSource;

/// Turns a profile URL into a normalized record.
///
/// `fetch` is infallible: transport, status, parse and query failures all
/// come back as [`FetchOutcome::Degraded`] with a record that still carries
/// `Total_Score`. The URL handed in is already trimmed and non-blank.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    fn platform(&self) -> Platform;

    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// The registered source for each platform.
#[derive(Clone, Default)]
pub struct SourceSet {
    sources: BTreeMap<Platform, Arc<dyn ProfileSource>>,
}

impl SourceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All four live sources, configured from `config`.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new()
            .with_source(Arc::new(GfgSource::new(
                config.archive_timeout_secs,
                &config.user_agent,
            )))
            .with_source(Arc::new(CodeChefSource::new(
                config.rating_timeout_secs,
                &config.user_agent,
            )))
            .with_source(Arc::new(HackerRankSource::new(
                config.badge_timeout_secs,
                &config.user_agent,
            )))
            .with_source(Arc::new(LeetCodeSource::new(
                config.judge_timeout_secs,
                &config.user_agent,
                &config.judge_graphql_url,
            )))
    }

    /// Registers `source` under its own platform, replacing any previous one.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn ProfileSource>) -> Self {
        self.sources.insert(source.platform(), source);
        self
    }

    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<Arc<dyn ProfileSource>> {
        self.sources.get(&platform).map(Arc::clone)
    }

    #[must_use]
    pub fn platforms(&self) -> Vec<Platform> {
        self.sources.keys().copied().collect()
    }
}

impl std::fmt::Debug for SourceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceSet")
            .field("platforms", &self.platforms())
            .finish()
    }
}
