use std::path::PathBuf;

/// Runtime settings, read from `CODEBOARD_*` environment variables.
///
/// Timeouts are per source and bound a single request end to end.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub roster_path: PathBuf,
    pub output_path: PathBuf,
    /// Browser-like `User-Agent` sent to the profile pages.
    pub user_agent: String,
    pub badge_timeout_secs: u64,
    pub rating_timeout_secs: u64,
    pub archive_timeout_secs: u64,
    pub judge_timeout_secs: u64,
    pub judge_graphql_url: String,
    /// Students dispatched at once; always at least 1.
    pub max_concurrent_students: usize,
}
