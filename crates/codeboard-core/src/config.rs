use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so only malformed values fail. Tests drive
/// this with a `HashMap` lookup instead of touching the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_timeout = |var: &str, default: &str| -> Result<u64, ConfigError> {
        match parse_u64(var, default)? {
            0 => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "timeout must be at least 1 second".to_string(),
            }),
            secs => Ok(secs),
        }
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("CODEBOARD_LOG_LEVEL", "info");
    let roster_path = PathBuf::from(or_default("CODEBOARD_ROSTER_PATH", "./config/roster.yaml"));
    let output_path = PathBuf::from(or_default(
        "CODEBOARD_OUTPUT_PATH",
        "./students_profiles.json",
    ));
    let user_agent = or_default("CODEBOARD_USER_AGENT", "Mozilla/5.0");

    let badge_timeout_secs = parse_timeout("CODEBOARD_BADGE_TIMEOUT_SECS", "10")?;
    let rating_timeout_secs = parse_timeout("CODEBOARD_RATING_TIMEOUT_SECS", "10")?;
    let archive_timeout_secs = parse_timeout("CODEBOARD_ARCHIVE_TIMEOUT_SECS", "10")?;
    let judge_timeout_secs = parse_timeout("CODEBOARD_JUDGE_TIMEOUT_SECS", "15")?;

    let judge_graphql_url = or_default(
        "CODEBOARD_JUDGE_GRAPHQL_URL",
        "https://leetcode.com/graphql",
    );
    if !judge_graphql_url.starts_with("http://") && !judge_graphql_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "CODEBOARD_JUDGE_GRAPHQL_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{judge_graphql_url}\""),
        });
    }

    let max_concurrent_students = parse_usize("CODEBOARD_MAX_CONCURRENT_STUDENTS", "1")?.max(1);

    Ok(AppConfig {
        log_level,
        roster_path,
        output_path,
        user_agent,
        badge_timeout_secs,
        rating_timeout_secs,
        archive_timeout_secs,
        judge_timeout_secs,
        judge_graphql_url,
        max_concurrent_students,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
