use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a layout from being produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CityError {
    #[error("invalid city configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid random range [{low}, {high})")]
    InvalidRange { low: u64, high: u64 },

    #[error("no eligible shape: all shape weights are zero")]
    NoEligibleShape,

    #[error("layout exceeded the limit of {limit} plots")]
    PlotLimitExceeded { limit: usize },
}

/// Failure while reading city parameters from disk.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] CityError),
}
