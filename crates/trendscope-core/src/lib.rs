//! Shared domain types and configuration for trendscope.
//!
//! Everything the analysis crates exchange lives here: the fixed category
//! set, raw post records and per-hashtag samples coming from ingestion, the
//! scored/ranked outputs, and the persistable record handed to storage.

pub mod app_config;
pub mod category;
pub mod config;
pub mod scoring;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use category::Category;
pub use config::{load_app_config, load_app_config_from_env};
pub use scoring::{
    load_scoring_config, Baseline, FactorWeights, ScoringConfig, MAX_LOOKBACK_HOURS,
};
pub use types::{
    Confidence, EngagementCounts, HashtagSample, PersistableRecord, PostRecord, RankedResult,
    RecordMetadata, ScoredHashtag, SentimentDistribution, SentimentLabel, VersionId,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read scoring config at {path}: {source}")]
    ScoringFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scoring config: {0}")]
    ScoringFileParse(#[from] serde_yaml::Error),

    #[error("invalid scoring config: {0}")]
    Validation(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
