//! Shared vocabulary for the codeboard workspace: the four profile
//! platforms, the roster an aggregation run reads, and the environment-driven
//! application config.

pub mod app_config;
pub mod config;
pub mod platform;
pub mod roster;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use platform::Platform;
pub use roster::{load_roster, ProfileUrls, RosterFile, StudentRow};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read roster file {path}: {source}")]
    RosterFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster file: {0}")]
    RosterFileParse(#[source] serde_yaml::Error),

    #[error("roster validation failed: {0}")]
    Validation(String),
}
