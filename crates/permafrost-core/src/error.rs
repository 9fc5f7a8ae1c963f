//! Error types for the dashboard core.

use std::path::PathBuf;

use crate::hazard::HazardCategory;

/// Failure while reading the community table.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("cannot open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A row parsed as CSV but violates the schema's enumerations.
    #[error("dataset row {line} ({community}): {reason}")]
    MalformedRow {
        line: u64,
        community: String,
        reason: String,
    },

    #[error("community {0:?} appears more than once")]
    DuplicateCommunity(String),

    #[error("dataset contains no communities")]
    Empty,
}

/// Failure of a risk-derivation lookup on an out-of-domain input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeriveError {
    #[error("value {value} is outside the {category} enumeration")]
    OutsideEnumeration {
        category: HazardCategory,
        value: String,
    },

    #[error("rating score {0} is outside the domain (0 or 5..=15)")]
    RatingScoreOutOfDomain(u32),
}

/// A selection event that was rejected; the prior selection stays in place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown community {0:?}")]
    UnknownCommunity(String),

    #[error("unknown hazard category {0:?}")]
    UnknownCategory(String),
}

/// Startup configuration failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("map access token is empty")]
    EmptyToken,

    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("default community {0:?} is not in the dataset")]
    DefaultCommunityMissing(String),
}

/// Top-level error for the dashboard core.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Derive(#[from] DeriveError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
