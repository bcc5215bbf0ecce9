//! Profile scraping and aggregation for codeboard.
//!
//! Four sources (HackerRank badges, CodeChef contest rating, GeeksforGeeks
//! problem archive, LeetCode GraphQL) each turn a profile URL into a
//! [`SourceRecord`] that always carries a `Total_Score`. The [`Dispatcher`]
//! fans one individual's sources out concurrently into a fresh
//! [`ResultCollector`], and the [`ProfilePipeline`] drives that over a roster.

pub mod collector;
pub mod dispatch;
pub mod error;
pub mod pipeline;
pub mod score;
pub mod sources;
pub mod types;
pub mod username;

mod client;

pub use collector::ResultCollector;
pub use dispatch::Dispatcher;
pub use error::SourceError;
pub use pipeline::{ProfilePipeline, RosterReport};
pub use score::DifficultyCounts;
pub use sources::{
    CodeChefSource, GfgSource, HackerRankSource, LeetCodeSource, ProfileSource, SourceSet,
};
pub use types::{FailureKind, FetchOutcome, ProfileSet, SourceRecord};
pub use username::resolve_username;
